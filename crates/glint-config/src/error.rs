use std::path::PathBuf;

use thiserror::Error;

/// Errors locating or reading glint's files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a home directory")]
    NoHomeDir,
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
