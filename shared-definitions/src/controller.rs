/// Pilot input after pulse mapping. Rates are in deg/s, throttle is the raw
/// channel pulse in microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerInput {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub throttle: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PIDTune {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Bound applied to both the integral accumulator and the output.
    pub max_output: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PIDTuneInput {
    pub roll: PIDTune,
    pub pitch: PIDTune,
    pub yaw: PIDTune,
}
