use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::{
    communication_interfaces::i2c_adapter::I2CAdapter,
    config::{
        constants::{
            CALIBRATION_PROGRESS_STEP, CALIBRATION_SAMPLE_DELAY_MS, SENSOR_POLL_INTERVAL_US,
            SENSOR_READ_TIMEOUT_US,
        },
        store::CalibrationRecord,
    },
    util::{
        error::SensorError,
        math::vectors::{AccelerationVector3D, RotationVector3D},
        time::{elapsed_us, Clock},
    },
};

use super::registers::{
    AccelGyroConfigRegister, LowPassFrequencyValues, MPURegisters, Mpu6050AccelRegOut,
    Mpu6050GyroRegOut, MpuAccelSensitivityRanges, MpuGyroSensitivityRanges,
    MpuPowerManagementRegister, SensorSample, COMBINED_OUTPUT_LEN, DEFAULT_SLAVE_ADDR,
};

/// Maps the peripheral gyro axes onto the airframe. The board is mounted
/// with X along pitch and Y along roll, and Z pointing down.
pub fn remap_rotation_rates(gyro_data: Mpu6050GyroRegOut) -> RotationVector3D {
    RotationVector3D {
        roll: gyro_data.y as f64,
        pitch: gyro_data.x as f64,
        yaw: -(gyro_data.z as f64),
    }
}

/// Accelerometer X and Y are mirrored by the same mounting.
pub fn remap_acceleration(accel_data: Mpu6050AccelRegOut) -> AccelerationVector3D {
    AccelerationVector3D {
        x: -(accel_data.x as f64),
        y: -(accel_data.y as f64),
        z: accel_data.z as f64,
    }
}

pub struct MPU6050Sensor<I, C, D> {
    i2c_driver: I,
    clock: C,
    delay: D,
    mpu_addr: u8,
    accel_sensitivity: MpuAccelSensitivityRanges,
    gyro_sensitivity: MpuGyroSensitivityRanges,
    low_pass_frequency: LowPassFrequencyValues,
    rotation_rates: RotationVector3D,
    acceleration: AccelerationVector3D,
    temperature: i16,
    gyro_drift_calibration: RotationVector3D,
    accelerometer_calibration: AccelerationVector3D,
    calibrated: bool,
    calibration_delay_ms: u32,
    read_timeout_us: u32,
}

impl<I, C, D> MPU6050Sensor<I, C, D>
where
    I: I2CAdapter,
    C: Clock,
    D: DelayNs,
{
    pub fn new(i2c_driver: I, clock: C, delay: D) -> Self {
        MPU6050Sensor {
            i2c_driver,
            clock,
            delay,
            mpu_addr: DEFAULT_SLAVE_ADDR,
            accel_sensitivity: MpuAccelSensitivityRanges::ACCEL_RANGE_8G,
            gyro_sensitivity: MpuGyroSensitivityRanges::GYRO_RANGE_500,
            low_pass_frequency: LowPassFrequencyValues::Freq42Hz,
            rotation_rates: RotationVector3D::default(),
            acceleration: AccelerationVector3D::default(),
            temperature: 0,
            gyro_drift_calibration: RotationVector3D::default(),
            accelerometer_calibration: AccelerationVector3D::default(),
            calibrated: false,
            calibration_delay_ms: CALIBRATION_SAMPLE_DELAY_MS,
            read_timeout_us: SENSOR_READ_TIMEOUT_US,
        }
    }

    pub fn with_address(mut self, mpu_addr: u8) -> Self {
        self.mpu_addr = mpu_addr;
        self
    }

    /// Wakes the device and writes the range and filter configuration, in
    /// that order.
    pub fn initialize(&mut self) -> Result<(), SensorError<I::Error>> {
        self.set_power_management_register_default()?;
        let gyro_fs_sel = self.gyro_sensitivity.fs_sel;
        let accel_fs_sel = self.accel_sensitivity.afs_sel;
        self.write_range_register(MPURegisters::GYRO_CONFIG, gyro_fs_sel)?;
        self.write_range_register(MPURegisters::ACCEL_CONFIG, accel_fs_sel)?;
        self.write_register(MPURegisters::CONFIG, self.low_pass_frequency as u8)?;
        info!(
            "MPU6050 at {:#04x} initialized, gyro +/-{}dps accel +/-{}g",
            self.mpu_addr, self.gyro_sensitivity.range, self.accel_sensitivity.range
        );
        Ok(())
    }

    pub fn enable_low_pass_filter(
        &mut self,
        low_pass_freq: LowPassFrequencyValues,
    ) -> Result<(), SensorError<I::Error>> {
        self.write_register(MPURegisters::CONFIG, low_pass_freq as u8)?;
        self.low_pass_frequency = low_pass_freq;
        Ok(())
    }

    /// Changing the range invalidates any bias measured in the old one. The
    /// sensor state only changes once the device accepted the new range.
    pub fn set_gyro_sensitivity(
        &mut self,
        sensitivity: MpuGyroSensitivityRanges,
    ) -> Result<(), SensorError<I::Error>> {
        self.write_range_register(MPURegisters::GYRO_CONFIG, sensitivity.fs_sel)?;
        self.gyro_sensitivity = sensitivity;
        self.calibrated = false;
        Ok(())
    }

    pub fn set_accel_sensitivity(
        &mut self,
        sensitivity: MpuAccelSensitivityRanges,
    ) -> Result<(), SensorError<I::Error>> {
        self.write_range_register(MPURegisters::ACCEL_CONFIG, sensitivity.afs_sel)?;
        self.accel_sensitivity = sensitivity;
        self.calibrated = false;
        Ok(())
    }

    pub fn set_calibration_delay_ms(&mut self, delay_ms: u32) {
        self.calibration_delay_ms = delay_ms;
    }

    pub fn set_read_timeout_us(&mut self, timeout_us: u32) {
        self.read_timeout_us = timeout_us;
    }

    /// Reads one burst of accel, temperature and gyro registers.
    pub fn read_raw_sample(&mut self) -> Result<SensorSample, SensorError<I::Error>> {
        self.i2c_driver
            .write_to_device(self.mpu_addr, &[MPURegisters::ACCEL_MEASURE_START])
            .map_err(SensorError::Bus)?;
        self.i2c_driver
            .request_from_device(self.mpu_addr, COMBINED_OUTPUT_LEN)
            .map_err(SensorError::Bus)?;
        self.wait_for_bytes(COMBINED_OUTPUT_LEN)?;

        let mut buf = [0_u8; COMBINED_OUTPUT_LEN];
        for (index, byte) in buf.iter_mut().enumerate() {
            *byte = self.i2c_driver.read_byte().ok_or(SensorError::Timeout {
                expected: COMBINED_OUTPUT_LEN,
                available: index,
            })?;
        }
        Ok(SensorSample::from_be_bytes(&buf))
    }

    /// Samples the sensor and returns the remapped rotation rates in raw
    /// units, with the drift removed once calibrated.
    pub fn sample(&mut self) -> Result<RotationVector3D, SensorError<I::Error>> {
        let raw = self.read_raw_sample()?;
        let mut rotation_rates = remap_rotation_rates(raw.gyroscope);
        let mut acceleration = remap_acceleration(raw.accelerometer);
        if self.calibrated {
            rotation_rates = rotation_rates - self.gyro_drift_calibration;
            acceleration = acceleration - self.accelerometer_calibration;
        }

        self.rotation_rates = rotation_rates;
        self.acceleration = acceleration;
        self.temperature = raw.temperature;
        Ok(rotation_rates)
    }

    /// Averages `iterations` samples into new gyro and accelerometer offsets.
    /// The device must be still and level for the whole run, which blocks for
    /// `iterations` times the calibration delay.
    pub fn calibrate(
        &mut self,
        iterations: u32,
    ) -> Result<CalibrationRecord, SensorError<I::Error>> {
        if iterations == 0 {
            return Err(SensorError::NoSamples);
        }
        self.calibrated = false;
        info!("Calibrating gyro, {} samples", iterations);

        let mut rotation_rate_accumulator = RotationVector3D::default();
        let mut acceleration_accumulator = AccelerationVector3D::default();
        for iteration in 0..iterations {
            if iteration % CALIBRATION_PROGRESS_STEP == 0 {
                debug!("Calibration sample {}/{}", iteration, iterations);
            }
            rotation_rate_accumulator += self.sample()?;
            acceleration_accumulator += self.acceleration;
            self.delay.delay_ms(self.calibration_delay_ms);
        }

        let count = iterations as f64;
        let mut accelerometer_calibration = acceleration_accumulator / count;
        // Gravity stays on Z
        accelerometer_calibration.z = 0.0;
        let record = CalibrationRecord {
            gyro_calibration: rotation_rate_accumulator / count,
            accelerometer_calibration,
        };

        self.apply_calibration(&record);
        info!("Gyro calibrated {:?}", record.gyro_calibration);
        Ok(record)
    }

    pub fn apply_calibration(&mut self, record: &CalibrationRecord) {
        self.gyro_drift_calibration = record.gyro_calibration;
        self.accelerometer_calibration = record.accelerometer_calibration;
        self.calibrated = true;
    }

    pub fn calibration(&self) -> CalibrationRecord {
        CalibrationRecord {
            gyro_calibration: self.gyro_drift_calibration,
            accelerometer_calibration: self.accelerometer_calibration,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    pub fn rotation_rates(&self) -> RotationVector3D {
        self.rotation_rates
    }

    pub fn rates_dps(&self) -> RotationVector3D {
        self.rotation_rates / self.gyro_sensitivity.sensitivity
    }

    pub fn acceleration(&self) -> AccelerationVector3D {
        self.acceleration
    }

    pub fn acceleration_g(&self) -> AccelerationVector3D {
        self.acceleration / self.accel_sensitivity.sensitivity as f64
    }

    pub fn temperature_celsius(&self) -> f64 {
        self.temperature as f64 / 340.0 + 36.53
    }

    fn wait_for_bytes(&mut self, count: usize) -> Result<(), SensorError<I::Error>> {
        let started_at = self.clock.now_us();
        loop {
            let available = self.i2c_driver.available();
            if available >= count {
                return Ok(());
            }
            if elapsed_us(started_at, self.clock.now_us()) >= self.read_timeout_us {
                return Err(SensorError::Timeout {
                    expected: count,
                    available,
                });
            }
            self.delay.delay_us(SENSOR_POLL_INTERVAL_US);
        }
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), SensorError<I::Error>> {
        self.i2c_driver
            .write_to_device(self.mpu_addr, &[register, value])
            .map_err(SensorError::Bus)
    }

    fn write_range_register(
        &mut self,
        register: u8,
        fs_sel: u8,
    ) -> Result<(), SensorError<I::Error>> {
        let register_bitmap = AccelGyroConfigRegister::new()
            .with_fs_sel(fs_sel)
            .into_bits();
        self.write_register(register, register_bitmap)
    }

    fn set_power_management_register_default(&mut self) -> Result<(), SensorError<I::Error>> {
        let register_value = MpuPowerManagementRegister::new().into_bits();
        self.write_register(MPURegisters::POWER_MANAGEMENT, register_value)
    }
}
