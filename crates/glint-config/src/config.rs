//! User configuration file.

use std::fs;
use std::path::Path;

use glint_core::ColorTheme;
use serde::Deserialize;
use tracing::debug;

use crate::ConfigError;

/// Technology labels shown on the icon cloud by default.
pub const DEFAULT_ICONS: &[&str] = &[
    "typescript",
    "javascript",
    "dart",
    "java",
    "react",
    "flutter",
    "android",
    "html5",
    "css3",
    "nodedotjs",
    "express",
    "nextdotjs",
    "prisma",
    "amazonaws",
    "postgresql",
    "firebase",
    "nginx",
    "vercel",
    "testinglibrary",
    "jest",
    "cypress",
    "docker",
    "git",
    "jira",
    "github",
    "gitlab",
    "visualstudiocode",
    "androidstudio",
    "sonarqube",
    "figma",
];

/// Settings read from `config.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of drifting particles.
    pub particle_count: usize,
    /// Sparkles per 10 000 cells of area.
    pub sparkle_density: f32,
    /// Accent colour for the countdown and icon labels.
    pub color_theme: ColorTheme,
    /// Labels placed on the icon cloud.
    pub icons: Vec<String>,
    /// Maximum log level written to the log file.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_count: 120,
            sparkle_density: 60.0,
            color_theme: ColorTheme::default(),
            icons: DEFAULT_ICONS.iter().map(|s| s.to_string()).collect(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from the platform config path.
    ///
    /// A missing file yields the defaults. Callers decide how to handle an
    /// unreadable or malformed file.
    pub fn load() -> Result<Self, ConfigError> {
        let path = crate::config_path()?;
        let config = Self::load_from(&path)?;
        if config.is_none() {
            debug!(path = %path.display(), "no config file, using defaults");
        }
        Ok(config.unwrap_or_default())
    }

    /// Load from `path`. Returns `Ok(None)` when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
