//! Battery-related CLI arguments.

use clap::Parser;

use crate::{
    core::Settings,
    prelude::*,
    quantity::{
        charge::AmpHours,
        electric::{Volts, Watts},
        proportions::Percentage,
    },
};

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct BatteryArgs {
    /// Rated battery capacity in amp-hours.
    #[clap(long = "capacity-amp-hours", default_value = "80", env = "BATTERY_CAPACITY_AMP_HOURS")]
    pub capacity: AmpHours,

    /// Nominal battery voltage.
    #[clap(long = "nominal-voltage", default_value = "12", env = "BATTERY_NOMINAL_VOLTAGE")]
    pub nominal_voltage: Volts,

    /// UPS rated output power in watts.
    #[clap(long = "rated-power-watts", default_value = "500", env = "UPS_RATED_POWER_WATTS")]
    pub rated_power: Watts,

    /// Discharge termination voltage.
    #[clap(long = "min-voltage", default_value = "11.59", env = "BATTERY_MIN_VOLTAGE")]
    pub min_voltage: Volts,

    /// Charge termination voltage.
    #[clap(long = "charge-cutoff-voltage", default_value = "13.8", env = "BATTERY_CHARGE_CUTOFF_VOLTAGE")]
    pub charge_cutoff: Volts,

    /// Battery health percentage, derates the rated capacity.
    #[clap(long = "health-percent", default_value = "100", env = "BATTERY_HEALTH_PERCENT")]
    pub health: Percentage,
}

impl TryFrom<BatteryArgs> for Settings {
    type Error = Error;

    fn try_from(args: BatteryArgs) -> Result<Self> {
        ensure!(
            args.capacity.is_finite() && args.capacity > AmpHours::ZERO,
            "the capacity must be positive (got {})",
            args.capacity,
        );
        ensure!(
            args.health > Percentage::ZERO && args.health <= Percentage::FULL,
            "the health must be within (0%, 100%] (got {})",
            args.health,
        );
        ensure!(
            args.min_voltage < args.charge_cutoff,
            "the minimum voltage ({}) must be below the charge cutoff ({})",
            args.min_voltage,
            args.charge_cutoff,
        );
        Ok(Self::builder()
            .capacity(args.capacity)
            .nominal_voltage(args.nominal_voltage)
            .rated_power(args.rated_power)
            .min_voltage(args.min_voltage)
            .charge_cutoff(args.charge_cutoff)
            .health(args.health)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct TestArgs {
        #[clap(flatten)]
        battery: BatteryArgs,
    }

    fn parse(args: &[&str]) -> Result<Settings> {
        let args = TestArgs::try_parse_from(std::iter::once("upscast").chain(args.iter().copied()))?;
        Settings::try_from(args.battery)
    }

    #[test]
    fn defaults() -> Result {
        let settings = parse(&[])?;
        assert_eq!(settings.capacity, AmpHours(80.0));
        assert_eq!(settings.min_voltage, Volts(11.59));
        assert_eq!(settings.charge_cutoff, Volts(13.8));
        assert_eq!(settings.effective_capacity(), AmpHours(80.0));
        Ok(())
    }

    #[test]
    fn overrides() -> Result {
        let settings = parse(&["--capacity-amp-hours", "100", "--health-percent", "80"])?;
        assert_eq!(settings.effective_capacity(), AmpHours(80.0));
        Ok(())
    }

    #[test]
    fn invalid() {
        assert!(parse(&["--capacity-amp-hours", "0"]).is_err());
        assert!(parse(&["--health-percent", "0"]).is_err());
        assert!(parse(&["--health-percent", "120"]).is_err());
        assert!(parse(&["--min-voltage", "14"]).is_err());
        assert!(parse(&["--capacity-amp-hours", "lots"]).is_err());
    }
}
