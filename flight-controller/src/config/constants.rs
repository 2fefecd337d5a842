use shared_definitions::controller::{PIDTune, PIDTuneInput};

// Gyroscope calibration
/// Default sample count for callers of `MPU6050Sensor::calibrate`.
pub const GYRO_CALIBRATIONS: u32 = 2000;
pub const CALIBRATION_SAMPLE_DELAY_MS: u32 = 4;
pub const CALIBRATION_PROGRESS_STEP: u32 = 100;

// Sensor bus
pub const SENSOR_READ_TIMEOUT_US: u32 = 2_000;
pub const SENSOR_POLL_INTERVAL_US: u32 = 10;

// Calibration storage layout
pub const CALIBRATED_MARKER_ADDR: u32 = 300;
pub const CALIBRATION_RECORD_ADDR: u32 = 301;
pub const CALIBRATED_MARKER_VALUE: u8 = 0x01;

// Receiver pulse range in microseconds
pub const CHANNEL_MIN_POINT: u32 = 1000;
pub const CHANNEL_CENTER_POINT: u32 = 1500;
pub const CHANNEL_MAX_POINT: u32 = 2000;
pub const CHANNEL_DEADBAND: u32 = 8;
// 500us of stick travel maps to ~164 deg/s
pub const TARGET_RATE_DIVISOR: f64 = 3.0;

// Rate PID tunes
pub const ROLL_PID_TUNE: PIDTune = PIDTune {
    kp: 1.3,
    ki: 0.04,
    kd: 18.0,
    max_output: 400.0,
};
pub const PITCH_PID_TUNE: PIDTune = ROLL_PID_TUNE;
pub const YAW_PID_TUNE: PIDTune = PIDTune {
    kp: 4.0,
    ki: 0.02,
    kd: 0.0,
    max_output: 400.0,
};

pub const DEFAULT_PID_TUNE: PIDTuneInput = PIDTuneInput {
    roll: ROLL_PID_TUNE,
    pitch: PITCH_PID_TUNE,
    yaw: YAW_PID_TUNE,
};
