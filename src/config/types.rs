// Configuration type definitions

use serde::Deserialize;

fn default_base_url() -> String {
    "https://rajit-fastapi-backend.onrender.com".to_string()
}

fn default_source() -> String {
    "netlify".to_string()
}

fn default_token() -> String {
    "anonymous".to_string()
}

/// Answer service settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the ask endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Source tag sent with every question
    #[serde(default = "default_source")]
    pub source: String,
    /// Auth token sent with every question
    #[serde(default = "default_token")]
    pub token: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: default_base_url(),
            source: default_source(),
            token: default_token(),
        }
    }
}

/// Micro-prompt catalog override
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Replaces the built-in catalog when non-empty
    #[serde(default)]
    pub prompts: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
