use embedded_storage::Storage;
use log::{debug, info};

use crate::{
    config::constants::{CALIBRATED_MARKER_ADDR, CALIBRATED_MARKER_VALUE, CALIBRATION_RECORD_ADDR},
    util::{
        error::AppError,
        math::vectors::{AccelerationVector3D, RotationVector3D},
    },
};

const FIELD_LEN: usize = core::mem::size_of::<f64>();
const FIELD_COUNT: usize = 6;
const CLEARED_MARKER_VALUE: u8 = 0x00;

/// Size in bytes of the offsets block starting at the record address.
pub const CALIBRATION_RECORD_LEN: usize = FIELD_LEN * FIELD_COUNT;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct CalibrationRecord {
    pub gyro_calibration: RotationVector3D,
    pub accelerometer_calibration: AccelerationVector3D,
}

impl CalibrationRecord {
    // Storage order of the offsets.
    fn fields(&self) -> [f64; FIELD_COUNT] {
        [
            self.gyro_calibration.roll,
            self.gyro_calibration.pitch,
            self.gyro_calibration.yaw,
            self.accelerometer_calibration.x,
            self.accelerometer_calibration.y,
            self.accelerometer_calibration.z,
        ]
    }

    fn from_fields(fields: [f64; FIELD_COUNT]) -> Self {
        CalibrationRecord {
            gyro_calibration: RotationVector3D {
                roll: fields[0],
                pitch: fields[1],
                yaw: fields[2],
            },
            accelerometer_calibration: AccelerationVector3D {
                x: fields[3],
                y: fields[4],
                z: fields[5],
            },
        }
    }
}

/// Persists the sensor offsets behind a single "calibrated" marker byte.
///
/// The marker lives at its own address and is written last, so a record is
/// only ever reported once every offset has reached the medium. Any marker
/// value other than [`CALIBRATED_MARKER_VALUE`] reads as "no record", which
/// covers both zeroed and erased (0xFF) storage.
pub struct CalibrationStore<S> {
    flash: S,
    marker_addr: u32,
    record_addr: u32,
}

impl<S> CalibrationStore<S>
where
    S: Storage,
{
    pub fn new(flash: S) -> Self {
        Self::with_addresses(flash, CALIBRATED_MARKER_ADDR, CALIBRATION_RECORD_ADDR)
    }

    pub fn with_addresses(flash: S, marker_addr: u32, record_addr: u32) -> Self {
        debug_assert!(
            marker_addr < record_addr
                || marker_addr >= record_addr + CALIBRATION_RECORD_LEN as u32,
            "calibration marker overlaps the offsets block"
        );
        CalibrationStore {
            flash,
            marker_addr,
            record_addr,
        }
    }

    pub fn write(&mut self, record: &CalibrationRecord) -> Result<(), AppError<S::Error>> {
        self.invalidate()?;

        let mut address = self.record_addr;
        for field in record.fields() {
            self.flash
                .write(address, &field.to_le_bytes())
                .map_err(|error| AppError {
                    message: "Failed to store a calibration offset",
                    error,
                })?;
            address += FIELD_LEN as u32;
        }

        self.write_marker(CALIBRATED_MARKER_VALUE)?;
        info!("Calibration stored {:?}", record);
        Ok(())
    }

    pub fn read(&mut self) -> Result<Option<CalibrationRecord>, AppError<S::Error>> {
        let mut marker = [0_u8; 1];
        self.flash
            .read(self.marker_addr, &mut marker)
            .map_err(|error| AppError {
                message: "Failed to read the calibration marker",
                error,
            })?;
        if marker[0] != CALIBRATED_MARKER_VALUE {
            debug!("No stored calibration (marker {:#04x})", marker[0]);
            return Ok(None);
        }

        let mut fields = [0.0_f64; FIELD_COUNT];
        let mut address = self.record_addr;
        for field in fields.iter_mut() {
            let mut bytes = [0_u8; FIELD_LEN];
            self.flash
                .read(address, &mut bytes)
                .map_err(|error| AppError {
                    message: "Failed to read a calibration offset",
                    error,
                })?;
            *field = f64::from_le_bytes(bytes);
            address += FIELD_LEN as u32;
        }

        Ok(Some(CalibrationRecord::from_fields(fields)))
    }

    /// Clears the marker. The offsets are left as they are.
    pub fn invalidate(&mut self) -> Result<(), AppError<S::Error>> {
        self.write_marker(CLEARED_MARKER_VALUE)
    }

    fn write_marker(&mut self, value: u8) -> Result<(), AppError<S::Error>> {
        self.flash
            .write(self.marker_addr, &[value])
            .map_err(|error| AppError {
                message: "Failed to write the calibration marker",
                error,
            })
    }
}
