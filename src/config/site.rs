//! Site configuration (_data/config.json)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ContentError, Result};

/// Main site configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub seo: SeoConfig,
    pub header: HeaderConfig,
    pub contact: ContactConfig,
    pub footer: FooterConfig,
    pub navbar: NavbarConfig,
    pub blogs: BlogsConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl DataConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| ContentError::json(path, e))
    }
}

/// Load the site configuration, falling back to the built-in defaults when
/// the file is missing or malformed
pub fn load_config<P: AsRef<Path>>(path: P) -> DataConfig {
    DataConfig::load(path).unwrap_or_else(|e| {
        tracing::error!("Error loading config: {}", e);
        DataConfig::default()
    })
}

/// Search engine metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoConfig {
    pub site_name: String,
    pub site_title: String,
    pub site_description: String,
    pub url: String,
    pub author: String,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            site_name: "Blog".to_string(),
            site_title: "Blog".to_string(),
            site_description: "A blog website".to_string(),
            url: "https://example.com".to_string(),
            author: "Admin".to_string(),
        }
    }
}

/// Blog landing page header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub title: String,
    pub description: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: "Welcome to our blog".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub phone: String,
    pub email: String,
    pub address1: String,
    pub address2: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub links: String,
}

/// Blog posts featured on the home page, by slug
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogsConfig {
    pub slugs: Vec<String>,
}
