//! Viewer configuration, read from a TOML file.
//!
//! ```toml
//! [source]
//! url = "https://api.github.com/repos/<owner>/<repo>/contents/<file>.json"
//! timeout_secs = 30
//!
//! [chart]
//! palette = ["#33aa33", "#00dd00"]
//! mean_mode = "truncated"   # or "exact"
//! bucket_policy = "clamp"   # or "reject"
//! ```
//!
//! Every key is optional; a missing file means all defaults.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assessment::BucketPolicy;
use crate::render::{ChartStyle, MeanMode, Rgb};

/// Public gradebook used when no source is configured.
pub const DEFAULT_SOURCE_URL: &str = "https://api.github.com/repos/ebuonocore/Info_Pro_Graphique_frequences_notes/contents/20211203_serie_notes.json";

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const APP_DIR_NAME: &str = "gradechart";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// GitHub contents API URL of the gradebook JSON.
    pub url: String,
    /// Read this local file instead of fetching `url`.
    pub file: Option<PathBuf>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            file: None,
            timeout_secs: 30,
            user_agent: concat!("gradechart/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub palette: Vec<Rgb>,
    pub band_color: Rgb,
    pub marker_color: Rgb,
    pub mean_mode: MeanMode,
    pub bucket_policy: BucketPolicy,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let style = ChartStyle::default();
        Self {
            palette: style.palette,
            band_color: style.band_color,
            marker_color: style.marker_color,
            mean_mode: style.mean_mode,
            bucket_policy: BucketPolicy::default(),
        }
    }
}

impl ChartConfig {
    pub fn style(&self) -> ChartStyle {
        ChartStyle {
            palette: self.palette.clone(),
            band_color: self.band_color,
            marker_color: self.marker_color,
            mean_mode: self.mean_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub source: SourceConfig,
    pub chart: ChartConfig,
}

impl ViewerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file. The file must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), otherwise the file at
    /// `default_path()` if there is one, otherwise defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chart.palette.is_empty() {
            return Err(ConfigError::Invalid("chart.palette must not be empty".into()));
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Invalid("source.timeout_secs must be positive".into()));
        }
        if self.source.file.is_none() && self.source.url.trim().is_empty() {
            return Err(ConfigError::Invalid("source.url is empty and no source.file given".into()));
        }
        Ok(())
    }
}

/// Per-user application directory, e.g. `~/.config/gradechart` on Linux.
pub fn app_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME))
}

pub fn default_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = ViewerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
        assert_eq!(config.chart.palette.len(), 5);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = ViewerConfig::from_toml_str(
            r##"
            [source]
            timeout_secs = 5

            [chart]
            palette = ["#ff0000", "#00ff00"]
            mean_mode = "exact"
            bucket_policy = "reject"
            "##,
        )
        .unwrap();
        assert_eq!(config.source.timeout_secs, 5);
        assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
        assert_eq!(config.chart.palette, vec![Rgb(255, 0, 0), Rgb(0, 255, 0)]);
        assert_eq!(config.chart.mean_mode, MeanMode::Exact);
        assert_eq!(config.chart.bucket_policy, BucketPolicy::Reject);
        assert_eq!(config.chart.band_color, ChartStyle::default().band_color);
    }

    #[test]
    fn bad_color_is_parse_error() {
        let err = ViewerConfig::from_toml_str("[chart]\nband_color = \"green\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_palette_is_invalid() {
        let err = ViewerConfig::from_toml_str("[chart]\npalette = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[source]\nfile = \"grades.json\"\n").unwrap();

        let config = ViewerConfig::load(&path).unwrap();
        assert_eq!(config.source.file, Some(PathBuf::from("grades.json")));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let err = ViewerConfig::resolve(Some(Path::new("/nonexistent/gradechart.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
