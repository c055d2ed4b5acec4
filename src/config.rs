use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::SearchLimits;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub i18n: I18nSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default = "default_catalogs")]
    pub catalogs: Vec<CatalogSourceSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    pub default_radius_km: Option<f64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            default_radius_km: None,
        }
    }
}

impl SearchSettings {
    /// Limits with `1 <= default_limit <= max_limit`
    pub fn limits(&self) -> SearchLimits {
        let max_limit = self.max_limit.max(1);
        SearchLimits {
            default_limit: self.default_limit.clamp(1, max_limit),
            max_limit,
            default_radius_km: self.default_radius_km,
        }
    }
}

fn default_limit() -> usize { 20 }
fn default_max_limit() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct I18nSettings {
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            supported_languages: default_supported_languages(),
        }
    }
}

fn default_language() -> String { "en".to_string() }

fn default_supported_languages() -> Vec<String> {
    ["en", "hi", "kn", "ta", "te", "mr", "bn", "gu", "pa", "ml"]
        .iter()
        .map(|lang| lang.to_string())
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Where a catalog is loaded from
///
/// With neither `path` nor `url`, the built-in document of the same name is used.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogSourceSettings {
    pub name: String,
    pub path: Option<String>,
    pub url: Option<String>,
}

impl CatalogSourceSettings {
    pub fn builtin(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: None,
            url: None,
        }
    }
}

fn default_catalogs() -> Vec<CatalogSourceSettings> {
    vec![
        CatalogSourceSettings::builtin("soil-testing-centers"),
        CatalogSourceSettings::builtin("mandis"),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            search: SearchSettings::default(),
            i18n: I18nSettings::default(),
            logging: LoggingSettings::default(),
            catalogs: default_catalogs(),
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with AGRIGURU)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., AGRIGURU__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("AGRIGURU")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
