use std::{fs, path::Path, str::FromStr};

use serde::Deserialize;

use crate::{core::Sample, prelude::*};

/// Manually recorded battery readings.
#[must_use]
#[derive(Deserialize)]
pub struct Logbook {
    #[serde(default)]
    pub samples: Vec<Sample>,
}

impl FromStr for Logbook {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

impl Logbook {
    /// Discharge and recharge of an 80 Ah UPS battery.
    const DEMO: &str = include_str!("../data/default-log.toml");

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let logbook: Self = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?
            .parse()
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        info!(n_samples = logbook.samples.len(), "loaded");
        Ok(logbook)
    }

    pub fn demo() -> Result<Self> {
        Self::DEMO.parse().context("failed to parse the built-in log")
    }

    /// Read the log from the file, if given, or fall back to the built-in one.
    pub fn read_or_demo(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(
            || {
                info!("no log file given, using the built-in log");
                Self::demo()
            },
            Self::read_from,
        )
    }
}
