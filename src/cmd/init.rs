//! `pixiv-forwarder init`: write the default configuration file.
//!
//! Serializes the compiled-in [`Config`](crate::config::model::Config) in
//! the chosen format so every field is visible and editable.

use std::path::PathBuf;

use crate::cli::InitArgs;
use crate::config::format::serialize_config;
use crate::config::model::Config;
use crate::error::ForwarderError;

const HEADER: &str = "pixiv-forwarder config. Every value shown is the built-in default.";

pub fn execute(args: &InitArgs) -> Result<(), ForwarderError> {
    let ext = args.format.extension();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("pixiv-forwarder.{ext}")));

    if output.exists() {
        return Err(ForwarderError::FileExists { path: output });
    }

    std::fs::write(&output, render(ext)?)?;
    println!("Created {}", output.display());
    Ok(())
}

fn render(ext: &str) -> Result<String, ForwarderError> {
    let body = serialize_config(&Config::default(), ext)?;
    Ok(match ext {
        // JSON has no comments
        "json" => body,
        _ => format!("# {HEADER}\n\n{body}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::format::parse_config_str;

    #[test]
    fn rendered_json_parses_back_to_defaults() {
        let rendered = render("json").unwrap();
        let parsed = parse_config_str("json", &rendered, "init").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn rendered_yaml_carries_header_comment() {
        let rendered = render("yaml").unwrap();
        assert!(rendered.starts_with("# pixiv-forwarder config"));
        let parsed = parse_config_str("yaml", &rendered, "init").unwrap();
        assert_eq!(parsed, Config::default());
    }
}
