//! Configuration validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`Config`] for values the
//! forwarder cannot use: upstream hosts carrying a scheme or path, client
//! profile values that are not legal header values, and mount paths that
//! do not start with `/` or contain route-parameter syntax. Returns a
//! list of [`ValidationError`] values with per-field suggestions.

use axum::http::uri::Authority;
use axum::http::HeaderValue;

use super::model::Config;
use crate::error::ValidationError;

/// Validate an upstream host. Returns `Ok(())` or a human-readable error.
pub fn validate_host(host: &str) -> Result<(), String> {
    if host.is_empty() {
        return Err("host cannot be empty".into());
    }
    if host.contains("://") {
        return Err("host must not include a scheme (requests always use https)".into());
    }
    if host.contains('/') {
        return Err("host must not include a path".into());
    }
    if host.contains('@') {
        return Err("host must not include credentials".into());
    }
    host.parse::<Authority>()
        .map(|_| ())
        .map_err(|_| format!("'{host}' is not a valid hostname"))
}

/// Validate a mount path such as the edge prefix or the health path.
pub fn validate_mount_path(path: &str) -> Result<(), String> {
    if !path.starts_with('/') {
        return Err(format!("path must start with '/' (did you mean '/{path}'?)"));
    }
    if path.len() > 1 && path.ends_with('/') {
        return Err("path must not end with '/'".into());
    }
    for segment in path.split('/') {
        if segment.starts_with(':') || segment.starts_with('*') {
            return Err(format!(
                "segment '{segment}' would be read as a route parameter; use a literal path"
            ));
        }
        if segment.contains('{') || segment.contains('}') {
            return Err(format!(
                "segment '{segment}' must not contain '{{' or '}}'"
            ));
        }
    }
    Ok(())
}

fn suggest_bare_host(host: &str) -> Option<String> {
    let without_scheme = host.split_once("://").map_or(host, |(_, rest)| rest);
    let bare = without_scheme.split('/').next().unwrap_or_default();
    if bare.is_empty() || bare == host {
        None
    } else {
        Some(format!("did you mean '{bare}'?"))
    }
}

pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let hosts = [
        ("hosts.api", &config.hosts.api),
        ("hosts.image", &config.hosts.image),
        ("hosts.oauth", &config.hosts.oauth),
    ];
    for (field, host) in hosts {
        if let Err(message) = validate_host(host) {
            errors.push(ValidationError {
                field: field.into(),
                message,
                suggestion: suggest_bare_host(host),
            });
        }
    }

    let client = [
        ("client.user_agent", &config.client.user_agent),
        ("client.app_os", &config.client.app_os),
        ("client.app_os_version", &config.client.app_os_version),
        ("client.app_version", &config.client.app_version),
    ];
    for (field, value) in client {
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError {
                field: field.into(),
                message: "not a valid header value".into(),
                suggestion: Some("remove control characters and non-ASCII text".into()),
            });
        }
    }

    let mounts = [
        ("edge_prefix", &config.edge_prefix),
        ("health_path", &config.health_path),
    ];
    for (field, path) in mounts {
        if let Err(message) = validate_mount_path(path) {
            errors.push(ValidationError {
                field: field.into(),
                message,
                suggestion: None,
            });
        }
    }

    if config.edge_prefix == "/" {
        errors.push(ValidationError {
            field: "edge_prefix".into(),
            message: "prefix cannot be the root path".into(),
            suggestion: Some("use the worker runtime to serve from '/'".into()),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, config: &Config) -> String {
    let flag = |enabled: bool| if enabled { "enabled" } else { "disabled" };
    let lines = [
        format!(
            "  api    -> {} ({})",
            config.hosts.api,
            flag(config.routes.api)
        ),
        format!(
            "  image  -> {} ({})",
            config.hosts.image,
            flag(config.routes.image)
        ),
        format!(
            "  oauth  -> {} ({})",
            config.hosts.oauth,
            flag(config.routes.oauth)
        ),
        format!("  client: {}", config.client.user_agent),
        format!("  edge prefix: {}", config.edge_prefix),
    ];

    format!("{} is valid\n{}", path, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn host_with_scheme_fails_with_suggestion() {
        let mut config = Config::default();
        config.hosts.image = "https://i.pximg.net/".into();
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "hosts.image");
        assert_eq!(
            errors[0].suggestion.as_deref(),
            Some("did you mean 'i.pximg.net'?")
        );
    }

    #[test]
    fn host_with_port_passes() {
        assert!(validate_host("localhost:8443").is_ok());
    }

    #[test]
    fn empty_host_fails() {
        let mut config = Config::default();
        config.hosts.oauth = String::new();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("cannot be empty")));
    }

    #[test]
    fn control_characters_in_client_profile_fail() {
        let mut config = Config::default();
        config.client.app_version = "7.13.3\n".into();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "client.app_version"));
    }

    #[test]
    fn prefix_without_slash_fails() {
        let mut config = Config::default();
        config.edge_prefix = "api".into();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("did you mean '/api'?")));
    }

    #[test]
    fn root_prefix_fails() {
        let mut config = Config::default();
        config.edge_prefix = "/".into();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("root path")));
    }

    #[test]
    fn trailing_slash_fails() {
        assert!(validate_mount_path("/api/").is_err());
        assert!(validate_mount_path("/api").is_ok());
    }

    #[test]
    fn parameter_like_health_path_fails() {
        let mut config = Config::default();
        config.health_path = "/:health".into();
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "health_path");

        assert!(validate_mount_path("/status/*rest").is_err());
        assert!(validate_mount_path("/{id}").is_err());
        assert!(validate_mount_path("/_health").is_ok());
    }

    #[test]
    fn report_lists_route_flags() {
        let report = format_validation_report("pixiv-forwarder.yaml", &Config::default());
        assert!(report.contains("oauth  -> oauth.secure.pixiv.net (disabled)"));
        assert!(report.contains("image  -> i.pximg.net (enabled)"));
    }
}
