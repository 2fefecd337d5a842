use core::fmt::{self, Debug, Display, Formatter};

#[derive(Debug)]
pub struct AppError<E> {
    pub message: &'static str,
    pub error: E,
}

impl<E> Display for AppError<E>
where
    E: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {:?}", self.message, self.error)
    }
}

#[derive(Debug, PartialEq)]
pub enum SensorError<E> {
    /// The bus transport reported an error.
    Bus(E),
    /// Fewer bytes than requested arrived before the read timeout expired.
    Timeout { expected: usize, available: usize },
    /// Calibration was requested with zero iterations.
    NoSamples,
}

impl<E> Display for SensorError<E>
where
    E: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SensorError::Bus(error) => write!(f, "Sensor bus error {:?}", error),
            SensorError::Timeout {
                expected,
                available,
            } => write!(
                f,
                "Sensor timeout, expected {} bytes but {} available",
                expected, available
            ),
            SensorError::NoSamples => write!(f, "Calibration needs at least one sample"),
        }
    }
}

/// Failure of a calibrate-then-persist run.
#[derive(Debug)]
pub enum CalibrationError<SE, FE> {
    Sensor(SE),
    Storage(AppError<FE>),
}

impl<SE, FE> Display for CalibrationError<SE, FE>
where
    SE: Display,
    FE: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CalibrationError::Sensor(error) => write!(f, "Calibration failed: {}", error),
            CalibrationError::Storage(error) => write!(f, "Calibration not stored: {}", error),
        }
    }
}
