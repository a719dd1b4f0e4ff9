use serde::Serialize;

use crate::{
    core::{Mode, point::Measurement},
    prelude::*,
    quantity::{
        charge::{AmpHours, VoltsPerAmpHour},
        electric::{Amps, Volts},
    },
};

/// Minimal charge throughput to trust the historical voltage slope.
const MIN_THROUGHPUT: AmpHours = AmpHours(0.1);

/// Assumed voltage rise over a full charge cycle when the history is not enough.
const FALLBACK_CHARGE_RISE: Volts = Volts(1.5);

/// Assumed voltage drop per amp-hour when the history is not enough.
const FALLBACK_DISCHARGE_RATE: VoltsPerAmpHour = VoltsPerAmpHour(0.05);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Derived from the last sample.
    Measured,

    /// Averaged over the history.
    Historical,

    /// Hard-coded default because the history is too sparse or inconsistent.
    Fallback,
}

/// Voltage slope and representative current of the active mode.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RateEstimate {
    pub mode: Mode,

    /// Absolute voltage change per amp-hour charged or discharged.
    pub rate: VoltsPerAmpHour,

    pub rate_source: Source,

    /// Signed representative current: negative while charging.
    pub current: Amps,

    pub current_source: Source,
}

impl RateEstimate {
    /// Estimate the rates from the annotated history, picking the branch by the last measurement.
    ///
    /// Returns [`None`] for an empty history.
    pub fn estimate(history: &[Measurement], capacity: AmpHours) -> Option<Self> {
        let last = history.last()?;
        let estimate = match last.snapshot.mode() {
            Mode::Charging => Self::estimate_charging(history, last, capacity),
            Mode::Discharging => Self::estimate_discharging(history, last),
        };
        debug!(
            mode = %estimate.mode,
            rate = ?estimate.rate,
            rate_source = ?estimate.rate_source,
            current = ?estimate.current,
            current_source = ?estimate.current_source,
            "estimated",
        );
        Some(estimate)
    }

    fn estimate_charging(history: &[Measurement], last: &Measurement, capacity: AmpHours) -> Self {
        let charging = history.iter().filter(|measurement| measurement.snapshot.is_charging);
        let start_voltage =
            charging.clone().next().map_or(last.snapshot.voltage, |first| first.snapshot.voltage);
        let gained_charge: AmpHours =
            charging.map(|measurement| measurement.consumed_charge.abs()).sum();
        let voltage_gain = last.snapshot.voltage - start_voltage;

        let (rate, rate_source) = if gained_charge > MIN_THROUGHPUT && voltage_gain > Volts::ZERO {
            (voltage_gain / gained_charge, Source::Measured)
        } else {
            (FALLBACK_CHARGE_RISE / capacity, Source::Fallback)
        };

        let (current, current_source) = if last.snapshot.current < Amps::ZERO {
            (last.snapshot.current, Source::Measured)
        } else {
            warn!(
                current = ?last.snapshot.current,
                "charging with a non-negative current, assuming 1 A",
            );
            (Amps(-1.0), Source::Fallback)
        };

        Self { mode: Mode::Charging, rate, rate_source, current, current_source }
    }

    fn estimate_discharging(history: &[Measurement], last: &Measurement) -> Self {
        let discharging = history.iter().filter(|measurement| {
            !measurement.snapshot.is_charging && measurement.snapshot.current > Amps::ZERO
        });
        let used_charge: AmpHours =
            discharging.clone().map(|measurement| measurement.consumed_charge).sum();
        let voltage_drop = history[0].snapshot.voltage - last.snapshot.voltage;

        let (rate, rate_source) = if used_charge > MIN_THROUGHPUT && voltage_drop > Volts::ZERO {
            (voltage_drop / used_charge, Source::Measured)
        } else {
            (FALLBACK_DISCHARGE_RATE, Source::Fallback)
        };

        let (current, current_source) = if last.snapshot.current > Amps::ZERO {
            (last.snapshot.current, Source::Measured)
        } else {
            let (n_measurements, total_current) = discharging
                .fold((0_u32, Amps::ZERO), |(n, total), measurement| {
                    (n + 1, total + measurement.snapshot.current)
                });
            if n_measurements == 0 {
                (Amps(1.0), Source::Fallback)
            } else {
                (total_current / f64::from(n_measurements), Source::Historical)
            }
        };

        Self { mode: Mode::Discharging, rate, rate_source, current, current_source }
    }
}
