use crate::quantity::{
    charge::AmpHours,
    electric::{Volts, Watts},
    proportions::Percentage,
};

/// Battery and UPS configuration, read-only to the engine.
#[must_use]
#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct Settings {
    /// Rated battery capacity.
    #[builder(default = AmpHours(80.0))]
    pub capacity: AmpHours,

    #[builder(default = Volts(12.0))]
    pub nominal_voltage: Volts,

    /// UPS rated output power.
    #[builder(default = Watts(500.0))]
    pub rated_power: Watts,

    /// Discharge termination voltage.
    #[builder(default = Volts(11.59))]
    pub min_voltage: Volts,

    /// Charge termination voltage.
    #[builder(default = Volts(13.8))]
    pub charge_cutoff: Volts,

    /// Battery health which derates the rated capacity.
    #[builder(default = Percentage::FULL)]
    pub health: Percentage,
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Settings {
    /// Rated capacity corrected on the battery health.
    pub fn effective_capacity(&self) -> AmpHours {
        self.capacity * self.health
    }
}
