use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    core::{Mode, reference, sample::Sample},
    quantity::{
        charge::AmpHours,
        electric::{Amps, Milliamps, Volts, Watts},
        proportions::Percentage,
        time::Hours,
    },
};

/// Battery state at a moment in time, shared by the measured and the simulated points.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub timestamp: NaiveDateTime,
    pub voltage: Volts,
    pub residual_charge: AmpHours,
    pub state_of_charge: Percentage,

    /// Signed current: negative while charging.
    pub current: Amps,

    pub is_charging: bool,
}

impl Snapshot {
    pub const fn mode(&self) -> Mode {
        Mode::from_is_charging(self.is_charging)
    }
}

/// Sample annotated by the coulomb counter.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Measurement {
    #[serde(flatten)]
    pub snapshot: Snapshot,

    pub load: Watts,
    pub input_voltage: Volts,
    pub charge_current: Milliamps,

    /// Time since the previous valid sample, never negative.
    pub elapsed: Hours,

    /// Charge drawn from the battery during the elapsed time, negative while charging.
    pub consumed_charge: AmpHours,
}

impl Measurement {
    pub fn new(
        sample: &Sample,
        elapsed: Hours,
        consumed_charge: AmpHours,
        residual_charge: AmpHours,
    ) -> Self {
        Self {
            snapshot: Snapshot {
                timestamp: sample.timestamp,
                voltage: sample.voltage,
                residual_charge,
                state_of_charge: reference::state_of_charge(sample.voltage),
                current: sample.current(),
                is_charging: sample.is_charging,
            },
            load: sample.load,
            input_voltage: sample.input_voltage,
            charge_current: sample.charge_current,
            elapsed,
            consumed_charge,
        }
    }
}

/// Point of the combined measured and forecasted trajectory.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Point {
    Historical(Measurement),
    Forecast(Snapshot),
}

impl Point {
    pub const fn snapshot(&self) -> &Snapshot {
        match self {
            Self::Historical(measurement) => &measurement.snapshot,
            Self::Forecast(snapshot) => snapshot,
        }
    }

    pub const fn is_forecast(&self) -> bool {
        matches!(self, Self::Forecast(_))
    }
}
