use serde::Serialize;

use crate::{
    core::{
        Mode,
        forecast::Projection,
        history::annotate,
        point::{Measurement, Point, Snapshot},
        rate::RateEstimate,
        sample::{Sample, normalize},
        settings::Settings,
        summary::Summary,
    },
    prelude::*,
};

/// Complete output of one engine run.
///
/// Serializes the history and the forecast as one sequence of tagged [`Point`]s.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "Output")]
pub struct Estimate {
    /// Valid samples in chronological order, annotated by the coulomb counter.
    pub history: Vec<Measurement>,

    /// Simulated continuation of the last measurement in its mode.
    pub forecast: Vec<Snapshot>,

    /// Rates the forecast is based on, [`None`] without history.
    pub rates: Option<RateEstimate>,

    pub summary: Summary,
}

impl Estimate {
    /// Run the full pipeline from scratch: normalize, count, estimate rates, project and summarize.
    #[instrument(skip_all, fields(n_samples = samples.len()))]
    pub fn compute(samples: &[Sample], settings: &Settings) -> Self {
        let capacity = settings.effective_capacity();
        let history = annotate(&normalize(samples.iter().copied()), capacity);
        let (Some(last), Some(rates)) = (history.last(), RateEstimate::estimate(&history, capacity))
        else {
            info!("no valid samples");
            return Self { history, forecast: Vec::new(), rates: None, summary: Summary::default() };
        };
        let projection = Projection::project(&last.snapshot, &rates, settings);
        let summary = Summary::new(last, &projection);
        info!(
            n_measurements = history.len(),
            n_forecast_steps = projection.trajectory.len(),
            mode = %summary.mode,
            residual_charge = ?summary.residual_charge,
            remaining_time = ?summary.remaining_time(),
            "estimated",
        );
        Self { history, forecast: projection.trajectory, rates: Some(rates), summary }
    }

    pub const fn mode(&self) -> Mode {
        self.summary.mode
    }

    /// Whether the last measurement already meets its stop condition, leaving nothing to forecast.
    pub fn has_reached_end_of_cycle(&self) -> bool {
        !self.history.is_empty() && self.forecast.is_empty()
    }

    /// Measured history partitioned by the charging flag.
    pub fn history_in(&self, mode: Mode) -> impl Iterator<Item = &Measurement> {
        self.history.iter().filter(move |measurement| measurement.snapshot.mode() == mode)
    }

    /// Measured history followed by the forecast.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.history
            .iter()
            .copied()
            .map(Point::Historical)
            .chain(self.forecast.iter().copied().map(Point::Forecast))
    }
}

#[derive(Serialize)]
struct Output {
    points: Vec<Point>,
    rates: Option<RateEstimate>,
    summary: Summary,
}

impl From<Estimate> for Output {
    fn from(estimate: Estimate) -> Self {
        Self { points: estimate.points().collect(), rates: estimate.rates, summary: estimate.summary }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDate, NaiveDateTime};
    use itertools::Itertools;

    use super::*;
    use crate::quantity::{
        charge::AmpHours,
        electric::{Amps, Milliamps, Volts, Watts},
        proportions::Percentage,
        time::Hours,
    };

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 15).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn discharge_history() -> Vec<Sample> {
        vec![
            Sample::builder().timestamp(at(14, 18)).voltage(Volts(12.62)).load(Watts(36.9)).build(),
            Sample::builder().timestamp(at(15, 11)).voltage(Volts(12.49)).load(Watts(36.6)).build(),
            Sample::builder().timestamp(at(16, 24)).voltage(Volts(12.30)).load(Watts(36.9)).build(),
        ]
    }

    fn charge_sample() -> Sample {
        Sample::builder()
            .timestamp(at(16, 46))
            .voltage(Volts(12.91))
            .load(Watts(36.9))
            .input_voltage(Volts(13.8))
            .charge_current(Milliamps(3500.0))
            .is_charging(true)
            .build()
    }

    #[test]
    fn empty() {
        let estimate = Estimate::compute(&[], &Settings::default());
        assert!(estimate.history.is_empty());
        assert!(estimate.forecast.is_empty());
        assert_eq!(estimate.rates, None);
        assert_eq!(estimate.summary, Summary::default());
        assert_eq!(estimate.summary.runtime, Hours::ZERO);
        assert_eq!(estimate.summary.time_to_full, Hours::ZERO);
    }

    #[test]
    fn only_invalid_samples() {
        let samples = [Sample::builder().timestamp(at(14, 0)).voltage(Volts::ZERO).build()];
        let estimate = Estimate::compute(&samples, &Settings::default());
        assert!(estimate.history.is_empty());
        assert_eq!(estimate.summary, Summary::default());
    }

    #[test]
    fn discharging_scenario() {
        let settings = Settings::default();
        let estimate = Estimate::compute(&discharge_history(), &settings);

        assert_eq!(estimate.history.len(), 3);
        assert!(
            estimate
                .history
                .iter()
                .tuple_windows()
                .all(|(lhs, rhs)| rhs.snapshot.residual_charge < lhs.snapshot.residual_charge)
        );
        assert!(estimate.points().take(3).all(|point| !point.is_forecast()));
        assert!(estimate.points().skip(3).all(|point| point.is_forecast()));
        assert!(
            estimate
                .points()
                .tuple_windows()
                .all(|(lhs, rhs)| rhs.snapshot().timestamp > lhs.snapshot().timestamp)
        );

        let summary = estimate.summary;
        assert_eq!(summary.mode, Mode::Discharging);
        assert_eq!(summary.last_voltage, Volts(12.30));
        assert_abs_diff_eq!(summary.current.0, 36.9 / 12.30);
        assert!(summary.runtime.is_finite() && summary.runtime > Hours::ZERO);
        assert_eq!(summary.time_to_full, Hours::ZERO);
        assert_eq!(summary.runtime, summary.residual_charge / summary.current);

        let last = estimate.forecast.last().unwrap();
        assert_eq!(last.voltage, settings.min_voltage);
        assert_eq!(last.state_of_charge, Percentage::ZERO);
    }

    #[test]
    fn charging_scenario() {
        let settings = Settings::default();
        let mut samples = discharge_history();
        samples.push(charge_sample());
        let estimate = Estimate::compute(&samples, &settings);

        let summary = estimate.summary;
        assert_eq!(summary.mode, Mode::Charging);
        assert_eq!(estimate.mode(), Mode::Charging);
        assert_abs_diff_eq!(summary.current.0, -3.5);
        assert!(summary.time_to_full.is_finite() && summary.time_to_full > Hours::ZERO);
        assert_eq!(summary.runtime, Hours::ZERO);
        assert_eq!(summary.state_of_charge, Percentage::FULL);

        let rates = estimate.rates.unwrap();
        assert_eq!(rates.mode, Mode::Charging);
        assert_eq!(rates.current, Amps(-3.5));

        assert!(!estimate.forecast.is_empty());
        assert!(estimate.forecast.iter().all(|snapshot| snapshot.is_charging));
        assert!(estimate.forecast.iter().tuple_windows().all(|(lhs, rhs)| rhs.voltage >= lhs.voltage));
        assert!(estimate.forecast.iter().all(|snapshot| snapshot.voltage <= settings.charge_cutoff));
        assert!(estimate.forecast[0].voltage > Volts(12.91));

        assert_eq!(estimate.history_in(Mode::Charging).count(), 1);
        assert_eq!(estimate.history_in(Mode::Discharging).count(), 3);
    }

    #[test]
    fn unsorted_input() {
        let mut samples = discharge_history();
        samples.reverse();
        assert_eq!(
            Estimate::compute(&samples, &Settings::default()),
            Estimate::compute(&discharge_history(), &Settings::default()),
        );
    }

    #[test]
    fn idempotent() {
        let mut samples = discharge_history();
        samples.push(charge_sample());
        let settings = Settings::builder().health(Percentage(85.0)).build();
        let lhs = serde_json::to_string(&Estimate::compute(&samples, &settings)).unwrap();
        let rhs = serde_json::to_string(&Estimate::compute(&samples, &settings)).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn serializes_tagged_points() -> Result {
        let mut samples = discharge_history();
        samples.push(charge_sample());
        let estimate = Estimate::compute(&samples, &Settings::default());
        let json = serde_json::to_value(&estimate)?;

        let points = json["points"].as_array().unwrap();
        assert_eq!(points.len(), estimate.history.len() + estimate.forecast.len());
        assert_eq!(points[0]["kind"], "historical");
        assert_eq!(points[0]["voltage"], 12.62);
        assert_eq!(points[0]["elapsed"], 0.0);
        assert_eq!(points[3]["kind"], "historical");
        assert_eq!(points[3]["is_charging"], true);
        assert_eq!(points[4]["kind"], "forecast");
        assert!(points[4].get("elapsed").is_none());
        assert_eq!(json["summary"]["mode"], "charging");
        assert_eq!(json["rates"]["mode"], "charging");
        assert!(json.get("history").is_none());
        assert!(json.get("forecast").is_none());
        Ok(())
    }

    #[test]
    fn empty_battery() {
        let samples = [
            Sample::builder().timestamp(at(0, 0)).voltage(Volts(12.0)).load(Watts(1200.0)).build(),
            Sample::builder().timestamp(at(23, 0)).voltage(Volts(12.0)).load(Watts(1200.0)).build(),
        ];
        let estimate = Estimate::compute(&samples, &Settings::default());
        assert_eq!(estimate.summary.residual_charge, AmpHours::ZERO);
        assert_eq!(estimate.summary.runtime, Hours::ZERO);
        assert!(estimate.forecast.is_empty());
        assert!(estimate.has_reached_end_of_cycle());
        assert_eq!(
            crate::fmt::FormattedDuration(estimate.summary.remaining_time()).to_string(),
            "00:00:00",
        );
    }

    #[test]
    fn end_of_cycle() {
        let samples = [Sample::builder().timestamp(at(16, 0)).voltage(Volts(11.5)).build()];
        let estimate = Estimate::compute(&samples, &Settings::default());
        assert_eq!(estimate.history.len(), 1);
        assert!(estimate.forecast.is_empty());
        assert!(estimate.has_reached_end_of_cycle());

        assert!(!Estimate::compute(&[], &Settings::default()).has_reached_end_of_cycle());
        let estimate = Estimate::compute(&discharge_history(), &Settings::default());
        assert!(!estimate.has_reached_end_of_cycle());
    }

    #[test]
    fn health_derates_capacity() {
        let settings = Settings::builder().health(Percentage(50.0)).build();
        let estimate = Estimate::compute(&discharge_history(), &settings);
        assert_eq!(estimate.history[0].snapshot.residual_charge, AmpHours(40.0));
    }
}
