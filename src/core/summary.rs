use serde::Serialize;

use crate::{
    core::{Mode, forecast::Projection, point::Measurement},
    quantity::{
        charge::AmpHours,
        electric::{Amps, Volts},
        proportions::Percentage,
        time::Hours,
    },
};

/// Point-in-time battery status.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub mode: Mode,
    pub state_of_charge: Percentage,
    pub residual_charge: AmpHours,

    /// Signed current of the last measurement: negative while charging.
    pub current: Amps,

    pub last_voltage: Volts,

    /// Estimated time until empty, zero while charging and infinite when unknown.
    pub runtime: Hours,

    /// Estimated time until full, zero while discharging and infinite when unknown.
    pub time_to_full: Hours,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            mode: Mode::Discharging,
            state_of_charge: Percentage::ZERO,
            residual_charge: AmpHours::ZERO,
            current: Amps::ZERO,
            last_voltage: Volts::ZERO,
            runtime: Hours::ZERO,
            time_to_full: Hours::ZERO,
        }
    }
}

impl Summary {
    pub const fn new(last: &Measurement, projection: &Projection) -> Self {
        Self {
            mode: last.snapshot.mode(),
            state_of_charge: last.snapshot.state_of_charge,
            residual_charge: last.snapshot.residual_charge,
            current: last.snapshot.current,
            last_voltage: last.snapshot.voltage,
            runtime: projection.runtime,
            time_to_full: projection.time_to_full,
        }
    }

    /// The estimate which is meaningful in the current mode.
    pub const fn remaining_time(&self) -> Hours {
        match self.mode {
            Mode::Charging => self.time_to_full,
            Mode::Discharging => self.runtime,
        }
    }
}
