use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Open-Meteo endpoints. Overridable so the tool can point at a mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding_url: String,
    pub forecast_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_city = "Oslo"
/// timeout_secs = 10
///
/// [endpoints]
/// geocoding_url = "https://geocoding-api.open-meteo.com/v1/search"
/// forecast_url = "https://api.open-meteo.com/v1/forecast"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City used by `weather show` when none is given on the command line.
    pub default_city: Option<String>,
    pub timeout_secs: u64,
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Store a trimmed default city; blank input clears it.
    pub fn set_default_city(&mut self, city: &str) {
        let city = city.trim();
        self.default_city = (!city.is_empty()).then(|| city.to_string());
    }

    /// City from the command line, falling back to the configured default.
    pub fn resolve_city(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.default_city.clone())
            .ok_or_else(|| {
                anyhow!(
                    "No city given and no default city configured.\n\
                     Hint: run `weather show <city>` or `weather configure` first."
                )
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_open_meteo() {
        let cfg = Config::default();
        assert_eq!(cfg.endpoints.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.endpoints.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert!(cfg.default_city.is_none());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg = Config::from_toml("default_city = \"Oslo\"\n").expect("valid toml");
        assert_eq!(cfg.default_city.as_deref(), Some("Oslo"));
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cfg.endpoints, Endpoints::default());
    }

    #[test]
    fn endpoint_override() {
        let cfg = Config::from_toml(
            "[endpoints]\nforecast_url = \"http://localhost:9000/forecast\"\n",
        )
        .expect("valid toml");
        assert_eq!(cfg.endpoints.forecast_url, "http://localhost:9000/forecast");
        assert_eq!(cfg.endpoints.geocoding_url, DEFAULT_GEOCODING_URL);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml("timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.set_default_city("  Lisbon ");
        let text = toml::to_string_pretty(&cfg).expect("serialize");
        assert_eq!(Config::from_toml(&text).expect("parse"), cfg);
    }

    #[test]
    fn blank_default_city_clears_it() {
        let mut cfg = Config::default();
        cfg.set_default_city("Lisbon");
        cfg.set_default_city("   ");
        assert!(cfg.default_city.is_none());
    }

    #[test]
    fn resolve_city_prefers_explicit() {
        let mut cfg = Config::default();
        cfg.set_default_city("Lisbon");
        assert_eq!(cfg.resolve_city(Some("Porto")).unwrap(), "Porto");
        assert_eq!(cfg.resolve_city(None).unwrap(), "Lisbon");
    }

    #[test]
    fn resolve_city_errors_without_default() {
        let err = Config::default().resolve_city(None).unwrap_err();
        assert!(err.to_string().contains("No city given"));
        assert!(err.to_string().contains("Hint: run `weather"));
    }
}
