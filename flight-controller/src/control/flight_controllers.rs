use shared_definitions::controller::PIDTuneInput;

use crate::{config::constants::DEFAULT_PID_TUNE, util::math::vectors::RotationVector3D};

use super::pid::PID;

/// Independent rate PIDs for roll, pitch and yaw.
pub struct AxisController {
    roll_pid: PID,
    pitch_pid: PID,
    yaw_pid: PID,
}

impl AxisController {
    pub fn new(tune: PIDTuneInput) -> Self {
        AxisController {
            roll_pid: PID::new(tune.roll),
            pitch_pid: PID::new(tune.pitch),
            yaw_pid: PID::new(tune.yaw),
        }
    }

    /// One control step. `rates` and `targets` share units; the result is
    /// bounded per axis by that axis' `max_output`.
    pub fn compute(
        &mut self,
        rates: RotationVector3D,
        targets: RotationVector3D,
    ) -> RotationVector3D {
        RotationVector3D {
            roll: self.roll_pid.compute(rates.roll, targets.roll),
            pitch: self.pitch_pid.compute(rates.pitch, targets.pitch),
            yaw: self.yaw_pid.compute(rates.yaw, targets.yaw),
        }
    }

    pub fn set_pid_tune(&mut self, tune: PIDTuneInput) {
        self.roll_pid.set_tune(tune.roll);
        self.pitch_pid.set_tune(tune.pitch);
        self.yaw_pid.set_tune(tune.yaw);
    }

    pub fn pid_tune(&self) -> PIDTuneInput {
        PIDTuneInput {
            roll: self.roll_pid.tune(),
            pitch: self.pitch_pid.tune(),
            yaw: self.yaw_pid.tune(),
        }
    }

    /// Re-initializes every axis with its current gains.
    pub fn reset(&mut self) {
        *self = Self::new(self.pid_tune());
    }

    pub fn roll(&self) -> &PID {
        &self.roll_pid
    }

    pub fn pitch(&self) -> &PID {
        &self.pitch_pid
    }

    pub fn yaw(&self) -> &PID {
        &self.yaw_pid
    }
}

impl Default for AxisController {
    fn default() -> Self {
        Self::new(DEFAULT_PID_TUNE)
    }
}
