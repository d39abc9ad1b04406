//! Format-specific (de)serialization of [`Config`].
//!
//! YAML and TOML are gated by feature flags; JSON is always available
//! because `serde_json` is already needed for response bodies.

use crate::config::model::Config;
use crate::error::ForwarderError;

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<Config, ForwarderError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| ForwarderError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        "json" => serde_json::from_str(content).map_err(|e| ForwarderError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| ForwarderError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(ForwarderError::UnsupportedFormat(other.to_string())),
    }
}

/// Serialize a `Config` to a formatted string in the format named by `ext`.
pub fn serialize_config(config: &Config, ext: &str) -> Result<String, ForwarderError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::to_string(config)
            .map_err(|e| ForwarderError::Io(std::io::Error::other(e.to_string()))),

        "json" => serde_json::to_string_pretty(config)
            .map_err(|e| ForwarderError::Io(std::io::Error::other(e.to_string()))),

        #[cfg(feature = "toml")]
        "toml" => toml::to_string_pretty(config)
            .map_err(|e| ForwarderError::Io(std::io::Error::other(e.to_string()))),

        other => Err(ForwarderError::UnsupportedFormat(other.to_string())),
    }
}
