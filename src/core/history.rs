use chrono::NaiveDateTime;

use crate::{
    core::{point::Measurement, sample::Sample},
    quantity::{charge::AmpHours, time::Hours},
};

/// Coulomb counter over irregularly timed samples.
#[must_use]
pub struct CoulombCounter {
    capacity: AmpHours,

    /// Charge drawn since the first sample, always within `0..=capacity`.
    consumed_charge: AmpHours,

    previous_timestamp: Option<NaiveDateTime>,
}

impl CoulombCounter {
    pub const fn new(capacity: AmpHours) -> Self {
        Self { capacity, consumed_charge: AmpHours::ZERO, previous_timestamp: None }
    }

    /// Integrate the sample current over the time elapsed since the previous sample.
    pub fn apply(&mut self, sample: &Sample) -> Measurement {
        // Out-of-order and duplicate timestamps contribute no time:
        let elapsed = self.previous_timestamp.map_or(Hours::ZERO, |previous_timestamp| {
            Hours::from(sample.timestamp - previous_timestamp).max(Hours::ZERO)
        });
        let consumed_charge = sample.current() * elapsed;
        self.consumed_charge =
            (self.consumed_charge + consumed_charge).min(self.capacity).max(AmpHours::ZERO);
        self.previous_timestamp = Some(sample.timestamp);
        Measurement::new(sample, elapsed, consumed_charge, self.capacity - self.consumed_charge)
    }
}

/// Annotate the normalized samples with current, elapsed time and residual charge.
pub fn annotate(samples: &[Sample], capacity: AmpHours) -> Vec<Measurement> {
    let mut counter = CoulombCounter::new(capacity);
    samples.iter().map(|sample| counter.apply(sample)).collect()
}
