//! Configuration loading and management

use crate::core::error::{ConfigError, KapiError};
use crate::core::restaurant::Restaurant;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder substituted with the upstream image identifier
pub const IMAGE_ID_PLACEHOLDER: &str = "{image_id}";

pub const DEFAULT_IMAGE_URL_TEMPLATE: &str = "https://media-assets.swiggy.com/swiggy/image/upload/fl_lossy,f_auto,q_auto,w_300,h_300,c_fit/{image_id}";

pub const DEFAULT_MENU_URL: &str = "https://www.swiggy.com/dapi/menu/pl";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Upstream menu API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Menu endpoint, queried with restaurant id and coordinates
    pub menu_url: String,

    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            menu_url: DEFAULT_MENU_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Menu normalization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// CDN URL with an `{image_id}` placeholder
    pub image_url_template: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            image_url_template: DEFAULT_IMAGE_URL_TEMPLATE.to_string(),
        }
    }
}

/// Session rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum distance between creation and cutoff
    pub max_duration_hours: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_duration_hours: 24,
        }
    }
}

impl SessionConfig {
    pub fn max_duration(&self) -> chrono::Duration {
        chrono::Duration::hours(self.max_duration_hours)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KapiConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub menu: MenuConfig,
    pub session: SessionConfig,

    /// Restaurants sessions can be created against
    pub restaurants: Vec<Restaurant>,
}

impl Default for KapiConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl KapiConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| {
            KapiError::from(ConfigError::FileNotFound {
                path: path.display().to_string(),
            })
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            KapiError::from(ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(KapiError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check
    pub fn validate(&self) -> Result<(), KapiError> {
        if !self.menu.image_url_template.contains(IMAGE_ID_PLACEHOLDER) {
            return Err(ConfigError::InvalidValue {
                field: "menu.image_url_template".to_string(),
                value: self.menu.image_url_template.clone(),
                message: format!("must contain {}", IMAGE_ID_PLACEHOLDER),
            }
            .into());
        }
        if self.session.max_duration_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.max_duration_hours".to_string(),
                value: self.session.max_duration_hours.to_string(),
                message: "must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Find a catalogue restaurant by id
    pub fn find_restaurant(&self, id: u64) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    /// Default configuration with the built-in restaurant catalogue
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            menu: MenuConfig::default(),
            session: SessionConfig::default(),
            restaurants: Restaurant::defaults(),
        }
    }
}
