//! Configuration loading and validation.
//!
//! The forwarder's configuration is static: it is resolved once at startup
//! from compiled-in defaults, optionally overlaid by a single config file,
//! validated, and then shared read-only for the life of the process.
//! Submodules provide the data model, format handling, and validation.

pub mod format;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

use crate::error::ForwarderError;
use model::Config;

/// File names probed in the working directory when no `--config` is given.
pub const AUTO_DETECT_CANDIDATES: &[&str] = &[
    "pixiv-forwarder.yaml",
    "pixiv-forwarder.yml",
    "pixiv-forwarder.json",
    "pixiv-forwarder.toml",
];

/// A resolved configuration and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: String,
}

/// Resolve the configuration: an explicit file, an auto-detected file, or
/// the compiled-in defaults, in that order.
pub async fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ForwarderError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => auto_detect().await,
    };

    let Some(path) = path else {
        return Ok(LoadedConfig {
            config: Config::default(),
            source: "defaults".into(),
        });
    };

    let config = load_file(&path).await?;
    Ok(LoadedConfig {
        config,
        source: path.display().to_string(),
    })
}

/// Read, parse and validate one config file.
pub async fn load_file(path: &Path) -> Result<Config, ForwarderError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ForwarderError::ConfigFileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ForwarderError::Io(e)
        }
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let config = format::parse_config_str(ext, &content, &path.display().to_string())?;

    validation::validate(&config).map_err(|errors| ForwarderError::ConfigValidation { errors })?;
    Ok(config)
}

async fn auto_detect() -> Option<PathBuf> {
    for name in AUTO_DETECT_CANDIDATES {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected config file");
            return Some(path);
        }
    }
    None
}
