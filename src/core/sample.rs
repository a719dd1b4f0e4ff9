use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use crate::quantity::electric::{Amps, Milliamps, Volts, Watts};

/// Raw manual reading of the UPS battery.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, bon::Builder)]
#[serde(from = "Record")]
pub struct Sample {
    pub timestamp: NaiveDateTime,

    /// Battery terminal voltage.
    pub voltage: Volts,

    /// Load power as reported by the UPS.
    #[builder(default)]
    pub load: Watts,

    /// Voltage of the charging source.
    #[builder(default)]
    pub input_voltage: Volts,

    /// Charging current, only meaningful while charging.
    #[builder(default)]
    pub charge_current: Milliamps,

    #[builder(default)]
    pub is_charging: bool,
}

impl Sample {
    /// Readings with a non-positive (or undefined) voltage are considered broken telemetry.
    pub fn is_valid(&self) -> bool {
        self.voltage > Volts::ZERO && !self.voltage.0.is_nan()
    }

    /// Signed battery current: negative while charging, positive while discharging.
    pub fn current(&self) -> Amps {
        if self.is_charging { -Amps::from(self.charge_current) } else { self.load / self.voltage }
    }
}

/// Log-file representation of a sample with separate date and time columns.
#[derive(Deserialize)]
struct Record {
    date: NaiveDate,
    time: NaiveTime,
    voltage: Volts,
    watts: Watts,

    #[serde(default)]
    input_voltage: Volts,

    #[serde(default)]
    milliamps: Milliamps,

    #[serde(default)]
    charging: bool,
}

impl From<Record> for Sample {
    fn from(record: Record) -> Self {
        Self {
            timestamp: record.date.and_time(record.time),
            voltage: record.voltage,
            load: record.watts,
            input_voltage: record.input_voltage,
            charge_current: record.milliamps,
            is_charging: record.charging,
        }
    }
}

/// Order the samples chronologically and drop the invalid ones.
///
/// The sort is stable, so samples sharing a timestamp keep their original relative order.
pub fn normalize(samples: impl IntoIterator<Item = Sample>) -> Vec<Sample> {
    let mut samples: Vec<_> = samples.into_iter().filter(Sample::is_valid).collect();
    samples.sort_by_key(|sample| sample.timestamp);
    samples
}
