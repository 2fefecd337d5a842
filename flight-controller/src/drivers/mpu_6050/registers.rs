use bitfield_struct::bitfield;

pub const DEFAULT_SLAVE_ADDR: u8 = 0x68;

/// Bytes covered by one burst read from ACCEL_MEASURE_START: accel xyz,
/// temperature and gyro xyz, each big-endian.
pub const COMBINED_OUTPUT_LEN: usize = 14;

pub struct MPURegisters;
impl MPURegisters {
    pub const CONFIG: u8 = 0x1A;
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_MEASURE_START: u8 = 0x3B;
    pub const POWER_MANAGEMENT: u8 = 0x6B;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MpuGyroSensitivityRanges {
    pub fs_sel: u8,
    pub range: u16,
    pub sensitivity: f64,
}

impl MpuGyroSensitivityRanges {
    pub const GYRO_RANGE_250: MpuGyroSensitivityRanges = Self {
        fs_sel: 0x0,
        range: 250,
        sensitivity: 131.0,
    };
    pub const GYRO_RANGE_500: MpuGyroSensitivityRanges = Self {
        fs_sel: 0x1,
        range: 500,
        sensitivity: 65.5,
    };
    pub const GYRO_RANGE_1000: MpuGyroSensitivityRanges = Self {
        fs_sel: 0x2,
        range: 1000,
        sensitivity: 32.8,
    };
    pub const GYRO_RANGE_2000: MpuGyroSensitivityRanges = Self {
        fs_sel: 0x3,
        range: 2000,
        sensitivity: 16.4,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MpuAccelSensitivityRanges {
    pub afs_sel: u8,
    pub range: u8,
    pub sensitivity: u16,
}

impl MpuAccelSensitivityRanges {
    pub const ACCEL_RANGE_2G: MpuAccelSensitivityRanges = Self {
        afs_sel: 0x0,
        range: 2,
        sensitivity: 16384,
    };
    pub const ACCEL_RANGE_4G: MpuAccelSensitivityRanges = Self {
        afs_sel: 0x1,
        range: 4,
        sensitivity: 8192,
    };
    pub const ACCEL_RANGE_8G: MpuAccelSensitivityRanges = Self {
        afs_sel: 0x2,
        range: 8,
        sensitivity: 4096,
    };
    pub const ACCEL_RANGE_16G: MpuAccelSensitivityRanges = Self {
        afs_sel: 0x3,
        range: 16,
        sensitivity: 2048,
    };
}

/// DLPF_CFG values for register 26. Bandwidths are for the gyro output.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LowPassFrequencyValues {
    None = 0x0,
    Freq188Hz = 0x1,
    Freq98Hz = 0x2,
    Freq42Hz = 0x3,
    Freq20Hz = 0x4,
    Freq10Hz = 0x5,
    Freq5Hz = 0x6,
}

/// Registers 27 and 28 share this layout.
#[bitfield(u8)]
pub struct AccelGyroConfigRegister {
    #[bits(3)]
    pub pad: u8,
    #[bits(2)]
    pub fs_sel: u8,
    pub z_self_test: bool,
    pub y_self_test: bool,
    pub x_self_test: bool,
}

///See docs for register 107
#[bitfield(u8)]
pub struct MpuPowerManagementRegister {
    #[bits(3)]
    pub clock_sel: u8, // Set to zero for internal oscillator
    pub temp_sensor_disable: bool,
    pub padding_bit: bool, // Set to zero
    pub cycle: bool,
    pub sleep: bool,
    pub device_reset: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Mpu6050AccelRegOut {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Mpu6050GyroRegOut {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// Raw burst output in peripheral axis order, before any remapping or
/// scaling.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub accelerometer: Mpu6050AccelRegOut,
    pub temperature: i16,
    pub gyroscope: Mpu6050GyroRegOut,
}

impl SensorSample {
    pub fn from_be_bytes(buf: &[u8; COMBINED_OUTPUT_LEN]) -> Self {
        let word = |index: usize| i16::from_be_bytes([buf[index], buf[index + 1]]);
        SensorSample {
            accelerometer: Mpu6050AccelRegOut {
                x: word(0),
                y: word(2),
                z: word(4),
            },
            temperature: word(6),
            gyroscope: Mpu6050GyroRegOut {
                x: word(8),
                y: word(10),
                z: word(12),
            },
        }
    }
}
