//! Loads gameplay tuning overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use pranksters_core::Tuning;

/// Reads and validates tuning from a TOML file, or returns the defaults.
pub(crate) fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning at {}", path.display()))?;
    parse_tuning(&contents).with_context(|| format!("invalid tuning in {}", path.display()))
}

fn parse_tuning(contents: &str) -> Result<Tuning> {
    let tuning: Tuning = toml::from_str(contents).context("failed to parse tuning toml")?;
    tuning.validate()?;
    Ok(tuning)
}
