//! Natural-language report of the battery event.

use std::fmt::{Display, Formatter};

use itertools::{Itertools, MinMaxResult};

use crate::{
    api::gemini,
    core::{Estimate, Mode, Settings},
    fmt::FormattedDuration,
    prelude::*,
};

pub const SYSTEM_INSTRUCTION: &str = "\
Act as a power systems technician. Analyze the following UPS battery log data and forecast.
Provide a concise, professional summary (3-4 sentences) of the event.
Mention the key event (e.g., discharge, charge cycle), the approximate load, the voltage range observed, \
and the final estimated runtime (if discharging) or time to full charge (if charging).
Keep it brief and to the point.";

/// User query describing the settings, live status and the chronological history.
pub struct Prompt<'a> {
    pub estimate: &'a Estimate,
    pub settings: &'a Settings,
}

impl Display for Prompt<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (settings, summary) = (self.settings, &self.estimate.summary);

        writeln!(f, "Data Analysis Request:")?;
        writeln!(f, "- Battery Settings: {}, {}", settings.capacity, settings.nominal_voltage)?;
        writeln!(f, "- Battery Health: {}", settings.health)?;
        writeln!(f, "- UPS Rated: {}", settings.rated_power)?;
        writeln!(f, "- Minimum Discharge Voltage: {}", settings.min_voltage)?;
        writeln!(f, "- Maximum Charge Voltage: {}", settings.charge_cutoff)?;
        writeln!(f)?;

        writeln!(f, "Live Status Summary:")?;
        writeln!(f, "- Mode: {}", summary.mode)?;
        writeln!(f, "- Last State of Charge (SoC): {}", summary.state_of_charge)?;
        writeln!(f, "- Amp-hours Remaining: {}", summary.residual_charge)?;
        writeln!(f, "- Last Current Draw: {}", summary.current)?;
        writeln!(f, "- Last Recorded Voltage: {}", summary.last_voltage)?;
        match summary.mode {
            Mode::Discharging => {
                writeln!(f, "- Estimated Runtime Remaining: {}", FormattedDuration(summary.runtime))?;
            }
            Mode::Charging => {
                writeln!(f, "- Estimated Time to Full: {}", FormattedDuration(summary.time_to_full))?;
            }
        }
        match self.estimate.history.iter().map(|measurement| measurement.snapshot.voltage).minmax() {
            MinMaxResult::NoElements => {}
            MinMaxResult::OneElement(voltage) => writeln!(f, "- Observed Voltage: {voltage}")?,
            MinMaxResult::MinMax(min, max) => {
                writeln!(f, "- Observed Voltage Range: {min} to {max}")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Event Log Data (chronological):")?;
        for measurement in &self.estimate.history {
            writeln!(
                f,
                "  - Time: {}, Voltage: {}, Load: {}, Charging: {}, Ah Remaining: {}",
                measurement.snapshot.timestamp.format("%H:%M:%S"),
                measurement.snapshot.voltage,
                measurement.load,
                measurement.snapshot.is_charging,
                measurement.snapshot.residual_charge,
            )?;
        }
        writeln!(f)?;
        write!(f, "Please generate the summary.")
    }
}

/// Generate the report text.
///
/// Never fails: missing data, missing credentials and request failures are reported as the text.
pub async fn generate(
    estimate: &Estimate,
    settings: &Settings,
    api_key: Option<String>,
    model: String,
) -> String {
    if estimate.history.is_empty() {
        return "No data to analyze. Please add log entries first.".to_string();
    }
    let Some(api_key) = api_key.filter(|api_key| !api_key.is_empty()) else {
        return "API key is not configured. Please set the GEMINI_API_KEY environment variable."
            .to_string();
    };
    let prompt = Prompt { estimate, settings }.to_string();
    let result = async move {
        gemini::Api::try_new(api_key, model)?.generate_content(SYSTEM_INSTRUCTION, &prompt).await
    }
    .await;
    match result {
        Ok(text) => text,
        Err(error) => {
            error!("failed to generate the summary: {error:#}");
            format!("Error generating summary: {error:#}")
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        core::Sample,
        quantity::electric::{Volts, Watts},
    };

    fn estimate() -> Estimate {
        let date = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
        let samples = [
            Sample::builder()
                .timestamp(date.and_hms_opt(14, 18, 0).unwrap())
                .voltage(Volts(12.62))
                .load(Watts(36.9))
                .build(),
            Sample::builder()
                .timestamp(date.and_hms_opt(15, 11, 0).unwrap())
                .voltage(Volts(12.49))
                .load(Watts(36.6))
                .build(),
        ];
        Estimate::compute(&samples, &Settings::default())
    }

    #[test]
    fn prompt_lists_the_history() {
        let estimate = estimate();
        let prompt = Prompt { estimate: &estimate, settings: &Settings::default() }.to_string();
        assert!(prompt.contains("- Battery Settings: 80.00 Ah, 12.00 V"));
        assert!(prompt.contains("- Mode: discharging"));
        assert!(prompt.contains("- Observed Voltage Range: 12.49 V to 12.62 V"));
        assert!(prompt.contains("- Time: 14:18:00, Voltage: 12.62 V, Load: 36.9 W, Charging: false"));
        assert!(prompt.contains("Estimated Runtime Remaining: "));
        assert!(prompt.ends_with("Please generate the summary."));
    }

    #[tokio::test]
    async fn no_data() {
        let estimate = Estimate::compute(&[], &Settings::default());
        let text = generate(&estimate, &Settings::default(), Some("key".into()), "model".into()).await;
        assert_eq!(text, "No data to analyze. Please add log entries first.");
    }

    #[tokio::test]
    async fn no_api_key() {
        let text = generate(&estimate(), &Settings::default(), None, "model".into()).await;
        assert!(text.starts_with("API key is not configured"));
        let text = generate(&estimate(), &Settings::default(), Some(String::new()), "model".into()).await;
        assert!(text.starts_with("API key is not configured"));
    }
}
