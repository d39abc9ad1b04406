//! `pixiv-forwarder validate`: check a configuration file for errors.
//!
//! Parses and validates the config file, then prints either the resolved
//! route table and client profile or the list of problems, as text or JSON.

use serde_json::{json, Value};

use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::format::parse_config_str;
use crate::config::model::Config;
use crate::config::validation;
use crate::error::{ForwarderError, ValidationError};

pub fn execute(args: &ValidateArgs) -> Result<(), ForwarderError> {
    let path = &args.config;

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ForwarderError::ConfigFileNotFound { path: path.clone() }
        } else {
            ForwarderError::Io(e)
        }
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let config = parse_config_str(ext, &content, &path.display().to_string())?;

    if let Err(errors) = validation::validate(&config) {
        match args.format {
            ValidateFormat::Text => {
                eprintln!("\u{2717} {} has {} errors\n", path.display(), errors.len());
                for error in &errors {
                    eprintln!("{error}");
                }
            }
            ValidateFormat::Json => println!("{}", invalid_json(&errors)),
        }
        return Err(ForwarderError::ConfigValidation { errors });
    }

    match args.format {
        ValidateFormat::Text => println!(
            "\u{2713} {}",
            validation::format_validation_report(&path.display().to_string(), &config)
        ),
        ValidateFormat::Json => println!("{}", valid_json(&config)),
    }

    Ok(())
}

/// Everything a running forwarder would derive from `config`.
fn valid_json(config: &Config) -> Value {
    json!({
        "valid": true,
        "routes": config.routes,
        "hosts": config.hosts,
        "client": config.client,
        "referer": config.referer(),
        "edge_prefix": config.edge_prefix,
        "health_path": config.health_path,
    })
}

fn invalid_json(errors: &[ValidationError]) -> Value {
    let errors: Vec<Value> = errors
        .iter()
        .map(|e| {
            json!({
                "field": e.field,
                "message": e.message,
                "suggestion": e.suggestion,
            })
        })
        .collect();
    json!({ "valid": false, "errors": errors })
}
