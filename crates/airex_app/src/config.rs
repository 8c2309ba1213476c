use std::fs;
use std::path::Path;

use airex_core::SimConfig;
use anyhow::Context;
use sim_logging::{sim_info, sim_warn};

pub(crate) const CONFIG_FILENAME: &str = "airex.ron";

/// Loads simulator settings from a RON file.
///
/// A missing or unreadable file falls back to defaults; values that parse
/// but make no sense (zero tick period, non-positive step) are an error.
pub(crate) fn load_config(path: &Path) -> anyhow::Result<SimConfig> {
    let config = match fs::read_to_string(path) {
        Ok(text) => match ron::from_str::<SimConfig>(&text) {
            Ok(config) => {
                sim_info!("Loaded simulator config from {:?}", path);
                config
            }
            Err(err) => {
                sim_warn!("Failed to parse config from {:?}: {}", path, err);
                SimConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => SimConfig::default(),
        Err(err) => {
            sim_warn!("Failed to read config from {:?}: {}", path, err);
            SimConfig::default()
        }
    };

    config
        .validate()
        .with_context(|| format!("invalid simulator config in {}", path.display()))?;
    Ok(config)
}
