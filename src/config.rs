//! Cross-origin settings for the HTTP layer.
//!
//! Defaults allow any origin to `PUT`, `DELETE`, `GET` and `POST`. Both lists
//! can be overridden from the environment (comma separated):
//!
//! - `CRUDBASE_CORS_ORIGINS`, e.g. `https://app.example.com,https://admin.example.com`
//! - `CRUDBASE_CORS_METHODS`, e.g. `GET,POST`

use axum::http::{HeaderValue, Method};
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::errors::ConfigError;

pub const ORIGINS_ENV: &str = "CRUDBASE_CORS_ORIGINS";
pub const METHODS_ENV: &str = "CRUDBASE_CORS_METHODS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Allowed origins; `"*"` allows any
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: ["PUT", "DELETE", "GET", "POST"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl WebConfig {
    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the two variables.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(origins) = lookup(ORIGINS_ENV) {
            config.allowed_origins = split_list(&origins);
        }
        if let Some(methods) = lookup(METHODS_ENV) {
            config.allowed_methods = split_list(&methods);
        }
        config
    }

    /// # Errors
    ///
    /// Returns a `ConfigError` if an origin or method cannot be parsed.
    pub fn cors_layer(&self) -> Result<CorsLayer, ConfigError> {
        let methods = self
            .allowed_methods
            .iter()
            .map(|method| {
                Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                    .map_err(|_| ConfigError::InvalidMethod(method.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let origin = if self.allowed_origins.iter().any(|origin| origin == "*") {
            AllowOrigin::any()
        } else {
            let origins = self
                .allowed_origins
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin)
                        .map_err(|_| ConfigError::InvalidOrigin(origin.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            AllowOrigin::list(origins)
        };

        Ok(CorsLayer::new().allow_methods(methods).allow_origin(origin))
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
