use std::{collections::HashMap, fs, path::Path};

use chrono::FixedOffset;
use serde::Deserialize;
use url::Url;

use crate::{error::DetectError, view::ViewSettings};

pub const SETTINGS_FILE: &str = "detect.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_url: String,
    pub output_prefix: String,
    /// Offset applied to UTC history timestamps before display.
    pub display_utc_offset_minutes: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            output_prefix: "/outputs".into(),
            // Asia/Seoul, no DST.
            display_utc_offset_minutes: 9 * 60,
        }
    }
}

impl Settings {
    /// Server URL with a trailing slash so endpoint joins keep any path prefix.
    pub fn base_url(&self) -> Result<Url, DetectError> {
        let raw = self.server_url.trim();
        if raw.is_empty() {
            return Err(DetectError::Config("server url must not be empty".into()));
        }
        let mut url = Url::parse(raw)
            .map_err(|e| DetectError::Config(format!("invalid server url '{raw}': {e}")))?;
        if url.cannot_be_a_base() {
            return Err(DetectError::Config(format!(
                "server url '{raw}' cannot be used as a base"
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn display_offset(&self) -> Result<FixedOffset, DetectError> {
        FixedOffset::east_opt(self.display_utc_offset_minutes * 60).ok_or_else(|| {
            DetectError::Config(format!(
                "display offset {} minutes is out of range",
                self.display_utc_offset_minutes
            ))
        })
    }

    pub fn view_settings(&self) -> Result<ViewSettings, DetectError> {
        Ok(ViewSettings {
            output_prefix: self.output_prefix.clone(),
            display_offset: self.display_offset()?,
        })
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_settings_from_path(path: &Path) -> Result<Settings, DetectError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        DetectError::Config(format!("failed to read '{}': {e}", path.display()))
    })?;
    toml::from_str::<HashMap<String, toml::Value>>(&raw).map_err(|e| {
        DetectError::Config(format!("failed to parse '{}': {e}", path.display()))
    })?;
    Ok(load_settings_from(Some(&raw), |key| std::env::var(key).ok()))
}

/// Layers an optional settings file and then environment variables over the defaults.
/// Unparseable values are ignored.
pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) {
            if let Some(v) = file_cfg.get("server_url").and_then(toml::Value::as_str) {
                settings.server_url = v.to_string();
            }
            if let Some(v) = file_cfg.get("output_prefix").and_then(toml::Value::as_str) {
                settings.output_prefix = v.to_string();
            }
            if let Some(v) = file_cfg
                .get("display_utc_offset_minutes")
                .and_then(toml::Value::as_integer)
                .and_then(|v| i32::try_from(v).ok())
            {
                settings.display_utc_offset_minutes = v;
            }
        }
    }

    if let Some(v) = env("DETECT_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("DETECT_OUTPUT_PREFIX") {
        settings.output_prefix = v;
    }

    if let Some(v) = env("APP__DISPLAY_UTC_OFFSET_MINUTES") {
        if let Ok(parsed) = v.parse::<i32>() {
            settings.display_utc_offset_minutes = parsed;
        }
    }

    settings
}
