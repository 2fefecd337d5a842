use shared_definitions::controller::ControllerInput;

use crate::config::constants::{
    CHANNEL_CENTER_POINT, CHANNEL_DEADBAND, CHANNEL_MAX_POINT, CHANNEL_MIN_POINT,
    TARGET_RATE_DIVISOR,
};

use super::pwm_receiver::CHANNEL_COUNT;

#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMappings {
    Roll = 0,
    Pitch = 1,
    Throttle = 2,
    Yaw = 3,
}

pub fn limit_pulse(pulse_us: u32) -> u32 {
    pulse_us.clamp(CHANNEL_MIN_POINT, CHANNEL_MAX_POINT)
}

/// Stick pulse to target rate in deg/s, zero inside the center deadband.
/// A zero width means the channel has not produced a pulse yet and maps to
/// a centered stick.
pub fn map_to_target_rate(pulse_us: u32) -> f64 {
    if pulse_us == 0 {
        return 0.0;
    }
    let pulse = limit_pulse(pulse_us) as f64;
    let upper = (CHANNEL_CENTER_POINT + CHANNEL_DEADBAND) as f64;
    let lower = (CHANNEL_CENTER_POINT - CHANNEL_DEADBAND) as f64;
    if pulse > upper {
        (pulse - upper) / TARGET_RATE_DIVISOR
    } else if pulse < lower {
        (pulse - lower) / TARGET_RATE_DIVISOR
    } else {
        0.0
    }
}

pub fn map_pulses_to_input(pulses: [u32; CHANNEL_COUNT]) -> ControllerInput {
    let throttle = pulses[ChannelMappings::Throttle as usize];
    ControllerInput {
        roll: map_to_target_rate(pulses[ChannelMappings::Roll as usize]),
        pitch: map_to_target_rate(pulses[ChannelMappings::Pitch as usize]),
        yaw: map_to_target_rate(pulses[ChannelMappings::Yaw as usize]),
        throttle: limit_pulse(throttle),
    }
}
