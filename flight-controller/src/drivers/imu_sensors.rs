use core::fmt::Debug;

use embedded_hal::delay::DelayNs;

use crate::{
    communication_interfaces::i2c_adapter::I2CAdapter,
    config::store::CalibrationRecord,
    drivers::mpu_6050::device::MPU6050Sensor,
    util::{error::SensorError, math::vectors::RotationVector3D, time::Clock},
};

/// Rate sensor as seen by the control loop.
pub trait Gyroscope {
    type Error: Debug;

    /// Samples the sensor and returns the corrected rates in deg/s.
    fn get_rotation_rates(&mut self) -> Result<RotationVector3D, Self::Error>;
    ///To run this the gyro must be completely still
    fn calculate_drift_average(&mut self, iterations: u32)
        -> Result<CalibrationRecord, Self::Error>;
    fn set_drift_calibration(&mut self, calibration: &CalibrationRecord);
    fn is_calibrated(&self) -> bool;
}

impl<I, C, D> Gyroscope for MPU6050Sensor<I, C, D>
where
    I: I2CAdapter,
    C: Clock,
    D: DelayNs,
{
    type Error = SensorError<I::Error>;

    fn get_rotation_rates(&mut self) -> Result<RotationVector3D, Self::Error> {
        self.sample()?;
        Ok(self.rates_dps())
    }

    fn calculate_drift_average(
        &mut self,
        iterations: u32,
    ) -> Result<CalibrationRecord, Self::Error> {
        self.calibrate(iterations)
    }

    fn set_drift_calibration(&mut self, calibration: &CalibrationRecord) {
        self.apply_calibration(calibration);
    }

    fn is_calibrated(&self) -> bool {
        MPU6050Sensor::is_calibrated(self)
    }
}
