//! Open-circuit voltage to state-of-charge reference curve of a flooded lead-acid 12 V block.

use itertools::Itertools;

use crate::quantity::{electric::Volts, proportions::Percentage};

/// Reference breakpoint of the curve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Breakpoint {
    pub voltage: Volts,
    pub state_of_charge: Percentage,
}

impl Breakpoint {
    const fn new(voltage: f64, state_of_charge: f64) -> Self {
        Self { voltage: Volts(voltage), state_of_charge: Percentage(state_of_charge) }
    }
}

/// Breakpoints strictly increasing by voltage: the first one is empty, the last one is full.
pub const BREAKPOINTS: [Breakpoint; 11] = [
    Breakpoint::new(11.59, 0.0),
    Breakpoint::new(11.63, 10.0),
    Breakpoint::new(11.76, 20.0),
    Breakpoint::new(11.87, 30.0),
    Breakpoint::new(11.97, 40.0),
    Breakpoint::new(12.07, 50.0),
    Breakpoint::new(12.18, 60.0),
    Breakpoint::new(12.29, 70.0),
    Breakpoint::new(12.41, 80.0),
    Breakpoint::new(12.53, 90.0),
    Breakpoint::new(12.64, 100.0),
];

/// Look up the state of charge by linearly interpolating between the enclosing breakpoints.
///
/// Voltages outside the table are clamped to empty or full.
#[must_use]
pub fn state_of_charge(voltage: Volts) -> Percentage {
    let (empty, full) = (BREAKPOINTS[0], BREAKPOINTS[BREAKPOINTS.len() - 1]);
    if voltage >= full.voltage {
        return full.state_of_charge;
    }
    if voltage <= empty.voltage {
        return empty.state_of_charge;
    }
    BREAKPOINTS
        .iter()
        .tuple_windows()
        .find(|(_, high)| voltage <= high.voltage)
        .map_or(full.state_of_charge, |(low, high)| {
            let fraction = (voltage - low.voltage) / (high.voltage - low.voltage);
            low.state_of_charge + (high.state_of_charge - low.state_of_charge) * fraction
        })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn breakpoints_are_strictly_increasing() {
        assert!(BREAKPOINTS.iter().tuple_windows().all(|(low, high)| low.voltage < high.voltage));
        assert_eq!(BREAKPOINTS[0].state_of_charge, Percentage(0.0));
        assert_eq!(BREAKPOINTS[BREAKPOINTS.len() - 1].state_of_charge, Percentage::FULL);
    }

    #[test]
    fn breakpoints_are_exact() {
        for breakpoint in BREAKPOINTS {
            assert_eq!(state_of_charge(breakpoint.voltage), breakpoint.state_of_charge);
        }
    }

    #[test]
    fn interpolates_between_breakpoints() {
        assert_abs_diff_eq!(state_of_charge(Volts(12.62)).0, 98.18, epsilon = 0.01);
        assert_abs_diff_eq!(state_of_charge(Volts(12.12)).0, 54.545, epsilon = 0.001);
    }

    #[test]
    fn clamps_outside_the_table() {
        assert_eq!(state_of_charge(Volts(13.8)), Percentage::FULL);
        assert_eq!(state_of_charge(Volts(0.0)), Percentage(0.0));
        assert_eq!(state_of_charge(Volts(-12.0)), Percentage(0.0));
        assert_eq!(state_of_charge(Volts(f64::INFINITY)), Percentage::FULL);
    }

    proptest! {
        #[test]
        fn non_decreasing(low in 10.0..14.0_f64, delta in 0.0..2.0_f64) {
            let (soc_low, soc_high) = (state_of_charge(Volts(low)), state_of_charge(Volts(low + delta)));
            prop_assert!(soc_low <= soc_high, "{soc_low:?} > {soc_high:?}");
            prop_assert!(soc_low >= Percentage(0.0) && soc_high <= Percentage::FULL);
        }
    }
}
