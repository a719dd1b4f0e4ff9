use std::ops::{Div, Mul};

use crate::quantity::{
    electric::{Amps, Volts},
    proportions::Percentage,
    time::Hours,
};

quantity!(AmpHours, via: f64, suffix: "Ah", precision: 2);

// Voltage change per amp-hour flowing in or out of the battery:
quantity!(VoltsPerAmpHour, via: f64, suffix: "V/Ah", precision: 4);

impl Div<Amps> for AmpHours {
    type Output = Hours;

    fn div(self, current: Amps) -> Self::Output {
        Hours(self.0 / current.0)
    }
}

impl Mul<Percentage> for AmpHours {
    type Output = Self;

    fn mul(self, percentage: Percentage) -> Self::Output {
        Self(self.0 * percentage.to_ratio())
    }
}

impl Div<AmpHours> for Volts {
    type Output = VoltsPerAmpHour;

    fn div(self, charge: AmpHours) -> Self::Output {
        VoltsPerAmpHour(self.0 / charge.0)
    }
}

impl Mul<AmpHours> for VoltsPerAmpHour {
    type Output = Volts;

    fn mul(self, charge: AmpHours) -> Self::Output {
        Volts(self.0 * charge.0)
    }
}
