use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Edge state of one receiver channel.
///
/// Every field is a single atomic word, so the control task can read the
/// latest width while the interrupt handler is mid-update without ever
/// seeing a torn value. Only the interrupt handler writes.
pub struct AtomicChannelState {
    rising_edge_us: AtomicU32,
    pulse_width_us: AtomicU32,
    high: AtomicBool,
}

impl AtomicChannelState {
    pub const fn new() -> Self {
        AtomicChannelState {
            rising_edge_us: AtomicU32::new(0),
            pulse_width_us: AtomicU32::new(0),
            high: AtomicBool::new(false),
        }
    }

    pub fn is_high(&self) -> bool {
        self.high.load(Ordering::Relaxed)
    }

    /// Zero until the first complete pulse has been measured.
    pub fn pulse_width_us(&self) -> u32 {
        self.pulse_width_us.load(Ordering::Acquire)
    }

    pub(crate) fn start_pulse(&self, now_us: u32) {
        self.rising_edge_us.store(now_us, Ordering::Relaxed);
        self.high.store(true, Ordering::Relaxed);
    }

    pub(crate) fn finish_pulse(&self, now_us: u32) {
        let width = now_us.wrapping_sub(self.rising_edge_us.load(Ordering::Relaxed));
        self.pulse_width_us.store(width, Ordering::Release);
        self.high.store(false, Ordering::Relaxed);
    }
}

impl Default for AtomicChannelState {
    fn default() -> Self {
        Self::new()
    }
}
