use embedded_storage::Storage;
use log::{info, warn};

use crate::{
    communication_interfaces::{controller::map_pulses_to_input, pwm_receiver::ChannelDecoder},
    config::store::{CalibrationRecord, CalibrationStore},
    control::flight_controllers::AxisController,
    drivers::imu_sensors::Gyroscope,
    util::{
        error::{AppError, CalibrationError},
        math::vectors::RotationVector3D,
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightStabilizerOut {
    /// Throttle pulse in microseconds, limited to the receiver range.
    pub throttle: u32,
    pub rotation_output_command: RotationVector3D,
}

/// Loads the stored offsets into the sensor. Returns whether a record was
/// found; without one the sensor keeps running uncalibrated.
pub fn restore_sensor_calibration<G, S>(
    imu: &mut G,
    store: &mut CalibrationStore<S>,
) -> Result<bool, AppError<S::Error>>
where
    G: Gyroscope,
    S: Storage,
{
    match store.read()? {
        Some(record) => {
            imu.set_drift_calibration(&record);
            info!("Calibration restored {:?}", record.gyro_calibration);
            Ok(true)
        }
        None => {
            warn!("No stored calibration, sensor runs uncalibrated");
            Ok(false)
        }
    }
}

pub fn calibrate_and_store<G, S>(
    imu: &mut G,
    store: &mut CalibrationStore<S>,
    iterations: u32,
) -> Result<CalibrationRecord, CalibrationError<G::Error, S::Error>>
where
    G: Gyroscope,
    S: Storage,
{
    let record = imu
        .calculate_drift_average(iterations)
        .map_err(CalibrationError::Sensor)?;
    store.write(&record).map_err(CalibrationError::Storage)?;
    Ok(record)
}

/// One control task: the rate sensor and the axis controller it owns, plus
/// the receiver decoder shared with the pin change interrupt.
pub struct FlightCore<'a, G> {
    imu: G,
    receiver: &'a ChannelDecoder,
    rotation_rate_flight_controller: AxisController,
}

impl<'a, G> FlightCore<'a, G>
where
    G: Gyroscope,
{
    pub fn new(
        imu: G,
        receiver: &'a ChannelDecoder,
        rotation_rate_flight_controller: AxisController,
    ) -> Self {
        FlightCore {
            imu,
            receiver,
            rotation_rate_flight_controller,
        }
    }

    /// Receiver pulses to targets, sensor to rates, both through the axis
    /// controller. A failed sample leaves the controller state untouched.
    pub fn run_cycle(&mut self) -> Result<FlightStabilizerOut, G::Error> {
        let input_values = map_pulses_to_input(self.receiver.latest_pulses());
        let desired_rotation_rate = RotationVector3D {
            roll: input_values.roll,
            pitch: input_values.pitch,
            yaw: input_values.yaw,
        };

        let rotation_rates = self.imu.get_rotation_rates().map_err(|error| {
            warn!("Skipping control cycle, sensor read failed: {:?}", error);
            error
        })?;

        let rotation_output_command = self
            .rotation_rate_flight_controller
            .compute(rotation_rates, desired_rotation_rate);

        Ok(FlightStabilizerOut {
            throttle: input_values.throttle,
            rotation_output_command,
        })
    }

    /// Recalibrates and persists the offsets. Blocks for the whole run and
    /// needs `&mut self`, so it cannot overlap a control cycle; the
    /// controller is reset afterwards.
    pub fn calibrate_sensors<S>(
        &mut self,
        store: &mut CalibrationStore<S>,
        iterations: u32,
    ) -> Result<CalibrationRecord, CalibrationError<G::Error, S::Error>>
    where
        S: Storage,
    {
        let result = calibrate_and_store(&mut self.imu, store, iterations);
        self.rotation_rate_flight_controller.reset();
        result
    }

    pub fn imu(&self) -> &G {
        &self.imu
    }

    pub fn imu_mut(&mut self) -> &mut G {
        &mut self.imu
    }

    pub fn flight_controller(&self) -> &AxisController {
        &self.rotation_rate_flight_controller
    }

    pub fn flight_controller_mut(&mut self) -> &mut AxisController {
        &mut self.rotation_rate_flight_controller
    }
}
