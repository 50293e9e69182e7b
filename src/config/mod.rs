mod types;

pub use types::*;

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable overriding `base_url`.
pub const BASE_URL_ENV: &str = "IMGVARIANTS_BASE_URL";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)
        .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./imgvariants.toml",
        "~/.config/imgvariants/config.toml",
        "/etc/imgvariants/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {}", path.display());
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML string without touching the environment.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| Error::config(e.to_string()))
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.trim().is_empty() {
            config.base_url = Some(url);
        }
    }
}

/// Check that a base URL can be probed over HTTP.
///
/// The catalog itself accepts any string; this guards the network boundary.
pub fn require_http_url(url: &str) -> Result<&str> {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed)
    } else {
        Err(Error::InvalidBaseUrl(url.to_string()))
    }
}

/// Return a list of validation warnings (non-fatal issues).
pub fn validate_config(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(ref url) = config.base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            warnings.push(format!("base_url '{url}' is not an http(s) URL"));
        }
    }

    if config.probe.connect_timeout_secs == 0 {
        warnings.push("probe.connect_timeout_secs is 0; connections will fail immediately".into());
    }

    let mut seen = HashSet::new();
    for (i, preset) in config.presets.iter().enumerate() {
        if !seen.insert(preset.label.as_str()) {
            warnings.push(format!("presets[{i}].label '{}' is a duplicate", preset.label));
        }
        if !preset.params.is_empty() && !preset.params.starts_with('?') {
            warnings.push(format!(
                "presets[{i}].params '{}' does not start with '?'",
                preset.params
            ));
        }
    }

    warnings
}
