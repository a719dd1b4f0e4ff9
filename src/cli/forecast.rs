use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::battery::BatteryArgs,
    core::{Estimate, Mode, Settings},
    logbook::Logbook,
    prelude::*,
    tables::{build_forecast_table, build_history_table, build_status_table},
};

#[must_use]
#[derive(Parser)]
pub struct ForecastArgs {
    /// TOML file with the recorded samples, the built-in demo log is used when omitted.
    #[clap(long = "log-file", env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the complete estimate as JSON instead of the tables, history and forecast as tagged points.
    #[clap(long)]
    pub json: bool,

    /// Show every n-th forecast step (a step is 5 minutes).
    #[clap(long, default_value = "6", value_parser = clap::value_parser!(u16).range(1..))]
    pub stride: u16,

    #[clap(flatten)]
    pub battery: BatteryArgs,
}

#[instrument(skip_all)]
pub fn forecast(args: &ForecastArgs) -> Result {
    let settings = Settings::try_from(args.battery)?;
    let logbook = Logbook::read_or_demo(args.log_file.as_deref())?;
    let estimate = Estimate::compute(&logbook.samples, &settings);
    info!(mode = %estimate.mode(), "computed");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
        return Ok(());
    }

    println!("{}", build_status_table(&estimate.summary, &settings));
    for mode in [Mode::Discharging, Mode::Charging] {
        let mut measurements = estimate.history_in(mode).peekable();
        if measurements.peek().is_some() {
            println!("{}", build_history_table(measurements, &settings));
        }
    }
    if estimate.history.is_empty() {
        warn!("nothing to forecast, the log has no valid samples");
    } else if estimate.has_reached_end_of_cycle() {
        warn!(
            mode = %estimate.mode(),
            last_voltage = %estimate.summary.last_voltage,
            "nothing to forecast, the battery has already reached the end of the cycle",
        );
    } else {
        // Start from the last measurement:
        let points: Vec<_> = estimate.points().skip(estimate.history.len() - 1).collect();
        println!("{}", build_forecast_table(&points, usize::from(args.stride)));
    }
    Ok(())
}
