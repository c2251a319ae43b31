use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ufo-dash.json";
/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "UFO_DASH_CONFIG";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV of sightings, loaded once at startup.
    pub data_file: PathBuf,
    /// Window title.
    pub app_title: String,
    /// Heading shown above the filter menu.
    pub header: String,
    /// Free text shown in the summary panel.
    pub summary_notes: String,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("ufo2.csv"),
            app_title: "UFO Sightings".to_string(),
            header: "UFO Sighting across the USA".to_string(),
            summary_notes: String::new(),
            window_size: [1200.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// Resolve the config file (env var, then working directory) and load it.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
