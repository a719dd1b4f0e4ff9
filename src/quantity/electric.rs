use std::ops::{Div, Mul};

use crate::quantity::{charge::AmpHours, time::Hours};

quantity!(Volts, via: f64, suffix: "V", precision: 2);
quantity!(Amps, via: f64, suffix: "A", precision: 2);
quantity!(Milliamps, via: f64, suffix: "mA", precision: 0);
quantity!(Watts, via: f64, suffix: "W", precision: 1);

impl From<Milliamps> for Amps {
    fn from(milliamps: Milliamps) -> Self {
        Self(milliamps.0 / 1000.0)
    }
}

impl Div<Volts> for Watts {
    type Output = Amps;

    fn div(self, voltage: Volts) -> Self::Output {
        Amps(self.0 / voltage.0)
    }
}

impl Mul<Hours> for Amps {
    type Output = AmpHours;

    fn mul(self, hours: Hours) -> Self::Output {
        AmpHours(self.0 * hours.0)
    }
}
