use chrono::TimeDelta;

use crate::{
    core::{Mode, point::Snapshot, rate::RateEstimate, reference, settings::Settings},
    quantity::{charge::AmpHours, electric::Amps, time::Hours},
};

/// Simulation step.
pub const STEP: TimeDelta = TimeDelta::minutes(5);

/// 48 hours of charging.
pub const MAX_CHARGING_STEPS: usize = 576;

/// 24 hours of discharging.
pub const MAX_DISCHARGING_STEPS: usize = 288;

/// Synthetic trajectory from the last measurement until the termination condition.
#[must_use]
pub struct Projection {
    pub trajectory: Vec<Snapshot>,

    /// Estimated time until empty, only set while discharging.
    pub runtime: Hours,

    /// Estimated time until full, only set while charging.
    pub time_to_full: Hours,
}

impl Projection {
    pub fn project(last: &Snapshot, estimate: &RateEstimate, settings: &Settings) -> Self {
        let capacity = settings.effective_capacity();
        let mut simulator = Simulator { state: *last, estimate: *estimate, capacity };
        let step = Hours::from(STEP);
        match estimate.mode {
            Mode::Charging => {
                let mut trajectory = Vec::new();
                while simulator.state.voltage < settings.charge_cutoff
                    && simulator.state.residual_charge < capacity
                    && trajectory.len() < MAX_CHARGING_STEPS
                {
                    trajectory.push(simulator.charge(step, settings));
                }
                let time_to_full = if estimate.current == Amps::ZERO {
                    Hours(f64::INFINITY)
                } else {
                    (capacity - last.residual_charge) / estimate.current.abs()
                };
                Self { trajectory, runtime: Hours::ZERO, time_to_full }
            }
            Mode::Discharging => {
                let mut trajectory = Vec::new();
                while simulator.state.voltage > settings.min_voltage
                    && simulator.state.residual_charge > AmpHours::ZERO
                    && trajectory.len() < MAX_DISCHARGING_STEPS
                {
                    trajectory.push(simulator.discharge(step, settings));
                }
                let runtime = if estimate.current > Amps::ZERO {
                    last.residual_charge / estimate.current
                } else {
                    Hours(f64::INFINITY)
                };
                Self { trajectory, runtime, time_to_full: Hours::ZERO }
            }
        }
    }
}

/// Fixed-step battery simulator driven by the estimated voltage slope and current.
struct Simulator {
    state: Snapshot,
    estimate: RateEstimate,
    capacity: AmpHours,
}

impl Simulator {
    fn charge(&mut self, step: Hours, settings: &Settings) -> Snapshot {
        let gained_charge = self.estimate.current.abs() * step;
        self.state.residual_charge += gained_charge;
        self.state.voltage += self.estimate.rate * gained_charge;
        self.state.residual_charge = self.state.residual_charge.min(self.capacity);
        self.state.voltage = self.state.voltage.min(settings.charge_cutoff);
        self.advance(true)
    }

    fn discharge(&mut self, step: Hours, settings: &Settings) -> Snapshot {
        let used_charge = self.estimate.current * step;
        self.state.residual_charge -= used_charge;
        self.state.voltage -= self.estimate.rate * used_charge;
        self.state.residual_charge = self.state.residual_charge.max(AmpHours::ZERO);
        self.state.voltage = self.state.voltage.max(settings.min_voltage);
        self.advance(false)
    }

    fn advance(&mut self, is_charging: bool) -> Snapshot {
        self.state.timestamp += STEP;
        self.state.state_of_charge = reference::state_of_charge(self.state.voltage);
        self.state.current = self.estimate.current;
        self.state.is_charging = is_charging;
        self.state
    }
}
