//! Configuration management for launchdash.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults. With
//! no file and no environment overrides the defaults describe the stock
//! dashboard: `spacex_launch_dash.csv` in the working directory, served on
//! `127.0.0.1:8050`.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::chart::PieStyle;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "launchdash";

/// Default dataset file name.
const DATASET_FILE_NAME: &str = "spacex_launch_dash.csv";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `LAUNCHDASH_`, sections split on
///    `__`, e.g. `LAUNCHDASH_SERVER__PORT`)
/// 2. TOML config file at `~/.config/launchdash/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset configuration.
    pub dataset: DatasetConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Dashboard presentation configuration.
    pub ui: UiConfig,
}

/// Dataset-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the launch records CSV file.
    pub path: PathBuf,
}

/// Server-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Page heading.
    pub title: String,
    /// Step granularity of the payload slider, in kilograms.
    pub slider_step: f64,
    /// Radial offset of each slice in the every-site pie.
    pub pie_pull: f64,
    /// Number of palette colours the every-site pie cycles through.
    pub all_sites_colors: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DATASET_FILE_NAME),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let pie = PieStyle::default();
        Self {
            title: "SpaceX Launch Data Dashboard".to_string(),
            slider_step: 1000.0,
            pie_pull: pie.pull,
            all_sites_colors: pie.all_sites_colors,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("LAUNCHDASH_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::ConfigValidation {
                message: "server.port must be greater than 0".to_string(),
            });
        }

        self.bind_addr()?;

        if !(self.ui.slider_step.is_finite() && self.ui.slider_step > 0.0) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "ui.slider_step must be greater than 0, got {}",
                    self.ui.slider_step
                ),
            });
        }

        if !(0.0..=1.0).contains(&self.ui.pie_pull) {
            return Err(Error::ConfigValidation {
                message: format!("ui.pie_pull must be within [0, 1], got {}", self.ui.pie_pull),
            });
        }

        if self.ui.all_sites_colors == 0 {
            return Err(Error::ConfigValidation {
                message: "ui.all_sites_colors must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Socket address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| Error::ConfigValidation {
                message: format!("server.host is not an IP address: {}", self.server.host),
            })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Pie presentation derived from the UI settings.
    #[must_use]
    pub fn pie_style(&self) -> PieStyle {
        PieStyle {
            pull: self.ui.pie_pull,
            all_sites_colors: self.ui.all_sites_colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.dataset.path, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8050);
        assert_eq!(config.ui.title, "SpaceX Launch Data Dashboard");
    }

    #[test]
    fn test_default_ui_config() {
        let ui = UiConfig::default();

        assert!((ui.slider_step - 1000.0).abs() < f64::EPSILON);
        assert!((ui.pie_pull - 0.2).abs() < f64::EPSILON);
        assert_eq!(ui.all_sites_colors, 2);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("server.port"));
    }

    #[test]
    fn test_validate_bad_host() {
        let mut config = Config::default();
        config.server.host = "not an ip".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("server.host"));
    }

    #[test]
    fn test_validate_zero_slider_step() {
        let mut config = Config::default();
        config.ui.slider_step = 0.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slider_step"));
    }

    #[test]
    fn test_validate_pull_out_of_range() {
        let mut config = Config::default();
        config.ui.pie_pull = 1.5;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("pie_pull"));
    }

    #[test]
    fn test_validate_zero_colors() {
        let mut config = Config::default();
        config.ui.all_sites_colors = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("all_sites_colors"));
    }

    #[test]
    fn test_bind_addr() {
        let config = Config::default();
        let addr = config.bind_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8050");
    }

    #[test]
    fn test_pie_style_follows_ui() {
        let mut config = Config::default();
        config.ui.pie_pull = 0.05;
        config.ui.all_sites_colors = 4;

        let style = config.pie_style();
        assert!((style.pull - 0.05).abs() < f64::EPSILON);
        assert_eq!(style.all_sites_colors, 4);
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("launchdash"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_file_sections() {
        let path = std::env::temp_dir().join(format!(
            "launchdash_test_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[dataset]\npath = \"launches.csv\"\n\n[server]\nport = 9000\n\n[ui]\nslider_step = 500.0\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone()));
        std::fs::remove_file(&path).ok();

        let config = config.unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("launches.csv"));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!((config.ui.slider_step - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_server_config_deserialize() {
        let json = r#"{"port": 9000}"#;
        let server: ServerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(server.port, 9000);
        assert_eq!(server.host, "127.0.0.1");
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("slider_step"));
        assert!(json.contains("spacex_launch_dash.csv"));
    }
}
