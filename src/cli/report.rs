use std::path::PathBuf;

use clap::Parser;

use crate::{
    api::gemini,
    cli::battery::BatteryArgs,
    core::{Estimate, Settings},
    logbook::Logbook,
    prelude::*,
    report::generate,
};

#[must_use]
#[derive(Parser)]
pub struct ReportArgs {
    /// TOML file with the recorded samples, the built-in demo log is used when omitted.
    #[clap(long = "log-file", env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Gemini API key.
    #[clap(long = "api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model name.
    #[clap(long, default_value = gemini::DEFAULT_MODEL, env = "GEMINI_MODEL")]
    pub model: String,

    #[clap(flatten)]
    pub battery: BatteryArgs,
}

#[instrument(skip_all)]
pub async fn report(args: ReportArgs) -> Result {
    let settings = Settings::try_from(args.battery)?;
    let logbook = Logbook::read_or_demo(args.log_file.as_deref())?;
    let estimate = Estimate::compute(&logbook.samples, &settings);
    println!("{}", generate(&estimate, &settings, args.api_key, args.model).await);
    Ok(())
}
