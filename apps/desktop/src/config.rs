use std::{collections::HashMap, fs};

use content_client::{DEFAULT_API_BASE, DEFAULT_MODEL};

#[derive(Debug)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub database_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.into(),
            model: DEFAULT_MODEL.into(),
            database_url: "sqlite://./data/portal.db".into(),
        }
    }
}

/// Defaults, then `portal.toml` in the working directory, then environment
/// variables. The credential is never written to disk by the app itself;
/// the file entry exists for local development only.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("portal.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_key") {
                settings.api_key = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("api_base") {
                settings.api_base = v.clone();
            }
            if let Some(v) = file_cfg.get("model") {
                settings.model = v.clone();
            }
            if let Some(v) = file_cfg.get("database_url") {
                settings.database_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("GEMINI_API_KEY") {
        settings.api_key = Some(v);
    }
    if let Ok(v) = std::env::var("PORTAL_API_KEY") {
        settings.api_key = Some(v);
    }

    if let Ok(v) = std::env::var("PORTAL_API_BASE") {
        settings.api_base = v;
    }
    if let Ok(v) = std::env::var("PORTAL_MODEL") {
        settings.model = v;
    }
    if let Ok(v) = std::env::var("PORTAL_DB") {
        settings.database_url = v;
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_public_endpoint() {
        let settings = Settings::default();
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert!(settings.api_key.is_none());
        assert!(settings.database_url.starts_with("sqlite://"));
    }
}
