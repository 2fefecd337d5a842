//! In-memory stand-ins for the bus, flash, clock and delay used by the unit
//! tests. Each mock is `Clone` and shares its state, so a test can keep a
//! handle after moving the mock into the driver under test.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use embedded_hal::{
    delay::DelayNs,
    i2c::{ErrorKind, ErrorType, I2c, Operation},
};
use embedded_storage::{ReadStorage, Storage};

use crate::{communication_interfaces::i2c_adapter::I2CAdapter, util::time::Clock};

#[derive(Debug, Clone, PartialEq)]
pub enum I2cTransaction {
    Write { address: u8, bytes: Vec<u8> },
    Read { address: u8, len: usize },
}

#[derive(Default)]
struct MockI2cState {
    transactions: Vec<I2cTransaction>,
    read_queue: VecDeque<Vec<u8>>,
    fail: bool,
}

#[derive(Clone, Default)]
pub struct MockI2c {
    state: Rc<RefCell<MockI2cState>>,
}

impl MockI2c {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the bytes returned by the next read.
    pub fn push_read(&self, bytes: &[u8]) {
        self.state.borrow_mut().read_queue.push_back(bytes.to_vec());
    }

    pub fn set_fail(&self, fail: bool) {
        self.state.borrow_mut().fail = fail;
    }

    pub fn transactions(&self) -> Vec<I2cTransaction> {
        self.state.borrow().transactions.clone()
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.transactions()
            .into_iter()
            .filter_map(|transaction| match transaction {
                I2cTransaction::Write { bytes, .. } => Some(bytes),
                I2cTransaction::Read { .. } => None,
            })
            .collect()
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail {
            return Err(ErrorKind::Other);
        }
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => state.transactions.push(I2cTransaction::Write {
                    address,
                    bytes: bytes.to_vec(),
                }),
                Operation::Read(buffer) => {
                    state.transactions.push(I2cTransaction::Read {
                        address,
                        len: buffer.len(),
                    });
                    let data = state.read_queue.pop_front().unwrap_or_default();
                    for (target, source) in buffer.iter_mut().zip(data.iter()) {
                        *target = *source;
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockFlashError {
    OutOfBounds,
    PowerLost,
}

struct MockFlashState {
    data: Vec<u8>,
    reads: Vec<(u32, usize)>,
    writes: Vec<(u32, Vec<u8>)>,
    writes_before_power_loss: Option<usize>,
}

/// RAM backed flash, erased to 0xFF.
#[derive(Clone)]
pub struct MockFlash {
    state: Rc<RefCell<MockFlashState>>,
}

impl MockFlash {
    pub fn new(capacity: usize) -> Self {
        MockFlash {
            state: Rc::new(RefCell::new(MockFlashState {
                data: vec![0xFF; capacity],
                reads: Vec::new(),
                writes: Vec::new(),
                writes_before_power_loss: None,
            })),
        }
    }

    /// Every write after the first `count` ones fails without touching the
    /// data, as if power dropped.
    pub fn lose_power_after(&self, count: usize) {
        self.state.borrow_mut().writes_before_power_loss = Some(count);
    }

    pub fn restore_power(&self) {
        self.state.borrow_mut().writes_before_power_loss = None;
    }

    pub fn poke(&self, offset: usize, bytes: &[u8]) {
        self.state.borrow_mut().data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    pub fn peek(&self, offset: usize, len: usize) -> Vec<u8> {
        self.state.borrow().data[offset..offset + len].to_vec()
    }

    pub fn reads(&self) -> Vec<(u32, usize)> {
        self.state.borrow().reads.clone()
    }

    pub fn writes(&self) -> Vec<(u32, Vec<u8>)> {
        self.state.borrow().writes.clone()
    }
}

impl ReadStorage for MockFlash {
    type Error = MockFlashError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        let start = offset as usize;
        let end = start + bytes.len();
        if end > state.data.len() {
            return Err(MockFlashError::OutOfBounds);
        }
        bytes.copy_from_slice(&state.data[start..end]);
        state.reads.push((offset, bytes.len()));
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.state.borrow().data.len()
    }
}

impl Storage for MockFlash {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if let Some(remaining) = state.writes_before_power_loss {
            if remaining == 0 {
                return Err(MockFlashError::PowerLost);
            }
            state.writes_before_power_loss = Some(remaining - 1);
        }
        let start = offset as usize;
        let end = start + bytes.len();
        if end > state.data.len() {
            return Err(MockFlashError::OutOfBounds);
        }
        state.data[start..end].copy_from_slice(bytes);
        state.writes.push((offset, bytes.to_vec()));
        Ok(())
    }
}

/// Clock that advances by a fixed step every time it is read.
#[derive(Clone)]
pub struct MockClock {
    now: Rc<Cell<u32>>,
    step: u32,
}

impl MockClock {
    pub fn new(start: u32, step: u32) -> Self {
        MockClock {
            now: Rc::new(Cell::new(start)),
            step,
        }
    }
}

impl Clock for MockClock {
    fn now_us(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step));
        now
    }
}

#[derive(Clone, Default)]
pub struct MockDelay {
    total_ns: Rc<Cell<u64>>,
    calls: Rc<Cell<usize>>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ns(&self) -> u64 {
        self.total_ns.get()
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + ns as u64);
        self.calls.set(self.calls.get() + 1);
    }
}

/// Burst register payload as the MPU6050 sends it.
pub fn mpu_payload(accel: [i16; 3], temperature: i16, gyro: [i16; 3]) -> Vec<u8> {
    accel
        .iter()
        .chain(core::iter::once(&temperature))
        .chain(gyro.iter())
        .flat_map(|word| word.to_be_bytes())
        .collect()
}

/// Serves one queued payload per read request and nothing once it runs dry.
#[derive(Default)]
pub struct ScriptedBus {
    payloads: VecDeque<Vec<u8>>,
    current: VecDeque<u8>,
}

impl ScriptedBus {
    pub fn with_payloads(payloads: Vec<Vec<u8>>) -> Self {
        ScriptedBus {
            payloads: payloads.into(),
            ..Default::default()
        }
    }
}

impl I2CAdapter for ScriptedBus {
    type Error = ();

    fn write_to_device(&mut self, _address: u8, _bytes: &[u8]) -> Result<(), ()> {
        Ok(())
    }

    fn request_from_device(&mut self, _address: u8, _count: usize) -> Result<(), ()> {
        self.current = self.payloads.pop_front().unwrap_or_default().into();
        Ok(())
    }

    fn available(&mut self) -> usize {
        self.current.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.current.pop_front()
    }
}
