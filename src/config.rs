//! Configuration management for Opaque-Driver

use std::env;

use serde::Deserialize;

use crate::identity::{Platform, PlatformSelector};
use crate::{Error, Result};

/// Driver configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enable fingerprint mitigation by default
    pub stealth_enabled: bool,

    /// Fixed user agent string; generated per session when unset
    pub user_agent: Option<String>,

    /// Platform selector for generated user agents
    pub platform: PlatformSelector,

    /// Number of entries in the user agent pool
    pub pool_size: usize,

    /// Platforms the pool draws from
    pub pool_platforms: Vec<Platform>,

    /// Route clicks and typing through the humanizer
    pub use_human_behavior: bool,

    /// Insert a random pause after each driver action
    pub auto_pause: bool,

    /// Minimum automatic pause in seconds
    pub pause_min_secs: f64,

    /// Maximum automatic pause in seconds
    pub pause_max_secs: f64,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stealth_enabled: true,
            user_agent: None,
            platform: PlatformSelector::Random,
            pool_size: 10,
            pool_platforms: vec![Platform::Windows, Platform::Mac, Platform::Linux],
            use_human_behavior: true,
            auto_pause: true,
            pause_min_secs: 0.5,
            pause_max_secs: 2.0,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(stealth) = env::var("OPAQUE_STEALTH") {
            config.stealth_enabled = stealth
                .parse()
                .map_err(|_| Error::configuration("Invalid OPAQUE_STEALTH"))?;
        }

        if let Ok(user_agent) = env::var("OPAQUE_USER_AGENT") {
            config.user_agent = Some(user_agent);
        }

        if let Ok(platform) = env::var("OPAQUE_PLATFORM") {
            config.platform = platform.parse()?;
        }

        if let Ok(pool_size) = env::var("OPAQUE_POOL_SIZE") {
            config.pool_size = pool_size
                .parse()
                .map_err(|_| Error::configuration("Invalid OPAQUE_POOL_SIZE"))?;
        }

        if let Ok(platforms) = env::var("OPAQUE_POOL_PLATFORMS") {
            config.pool_platforms = platforms
                .split(',')
                .map(|p| p.trim().parse())
                .collect::<Result<Vec<Platform>>>()?;
        }

        if let Ok(human) = env::var("OPAQUE_HUMAN_BEHAVIOR") {
            config.use_human_behavior = human
                .parse()
                .map_err(|_| Error::configuration("Invalid OPAQUE_HUMAN_BEHAVIOR"))?;
        }

        if let Ok(auto_pause) = env::var("OPAQUE_AUTO_PAUSE") {
            config.auto_pause = auto_pause
                .parse()
                .map_err(|_| Error::configuration("Invalid OPAQUE_AUTO_PAUSE"))?;
        }

        if let Ok(pause_min) = env::var("OPAQUE_PAUSE_MIN") {
            config.pause_min_secs = pause_min
                .parse()
                .map_err(|_| Error::configuration("Invalid OPAQUE_PAUSE_MIN"))?;
        }

        if let Ok(pause_max) = env::var("OPAQUE_PAUSE_MAX") {
            config.pause_max_secs = pause_max
                .parse()
                .map_err(|_| Error::configuration("Invalid OPAQUE_PAUSE_MAX"))?;
        }

        if let Ok(log_level) = env::var("OPAQUE_LOG_LEVEL") {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.stealth_enabled);
        assert!(config.user_agent.is_none());
        assert_eq!(config.platform, PlatformSelector::Random);
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.pool_platforms.len(), 3);
        assert!(config.use_human_behavior);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            stealth_enabled = false
            platform = "windows"
            pool_size = 4
            pool_platforms = ["windows", "linux"]
            pause_min_secs = 0.1
        "#;

        let config: Config = toml::from_str(toml).unwrap();

        assert!(!config.stealth_enabled);
        assert_eq!(config.platform, PlatformSelector::Windows);
        assert_eq!(config.pool_size, 4);
        assert_eq!(
            config.pool_platforms,
            vec![Platform::Windows, Platform::Linux]
        );
        assert_eq!(config.pause_min_secs, 0.1);
        // Unset fields keep their defaults
        assert!(config.auto_pause);
        assert_eq!(config.log_level, "info");
    }
}
