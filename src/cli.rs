mod battery;
mod forecast;
mod reference;
mod report;

use clap::{Parser, Subcommand};

pub use self::{forecast::forecast, reference::reference, report::report};
use crate::cli::{forecast::ForecastArgs, reference::ReferenceArgs, report::ReportArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: estimate the battery state and forecast the runtime or time to full charge.
    #[clap(name = "forecast")]
    Forecast(Box<ForecastArgs>),

    /// Print the voltage to state-of-charge reference curve.
    #[clap(name = "reference")]
    Reference(ReferenceArgs),

    /// Generate a natural-language report of the battery event.
    #[clap(name = "report")]
    Report(Box<ReportArgs>),
}
