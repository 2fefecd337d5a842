use shared_definitions::controller::PIDTune;

use crate::util::math::limit;

/// Rate PID for one axis.
///
/// The integral accumulator is bounded by the same `max_output` as the
/// output, and the derivative acts on the change of the raw error between
/// two calls, so `compute` must run at the cadence the gains were tuned for.
/// A `max_output` of zero pins the output to zero while the internal state
/// keeps updating.
#[derive(Debug, Clone)]
pub struct PID {
    tune: PIDTune,
    integral_total: f64,
    previous_error: f64,
    rate: f64,
    target: f64,
    output: f64,
}

impl PID {
    pub fn new(tune: PIDTune) -> Self {
        PID {
            tune,
            integral_total: 0.0,
            previous_error: 0.0,
            rate: 0.0,
            target: 0.0,
            output: 0.0,
        }
    }

    pub fn compute(&mut self, rate: f64, target: f64) -> f64 {
        let max_output = self.tune.max_output;
        let error = rate - target;

        self.integral_total = limit(self.integral_total + error * self.tune.ki, max_output);
        let derivative = error - self.previous_error;
        self.output = limit(
            error * self.tune.kp + self.integral_total + derivative * self.tune.kd,
            max_output,
        );

        self.previous_error = error;
        self.rate = rate;
        self.target = target;
        self.output
    }

    /// Swaps the gains without touching the accumulated state.
    pub fn set_tune(&mut self, tune: PIDTune) {
        self.tune = tune;
    }

    pub fn tune(&self) -> PIDTune {
        self.tune
    }

    pub fn integral_total(&self) -> f64 {
        self.integral_total
    }

    pub fn previous_error(&self) -> f64 {
        self.previous_error
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn output(&self) -> f64 {
        self.output
    }
}
