use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "review.toml";
pub const DEFAULT_API_BASE_URL: &str = "https://image-review-server.onrender.com";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_with(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file at `path` (if readable), then environment
/// overrides. Blank values never override.
pub fn load_settings_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = non_blank(file_cfg.get("api_base_url").cloned()) {
                settings.api_base_url = v;
            }
        }
    }

    if let Some(v) = non_blank(env("REVIEW_API_URL")) {
        settings.api_base_url = v;
    }
    if let Some(v) = non_blank(env("APP__API_BASE_URL")) {
        settings.api_base_url = v;
    }

    settings
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
