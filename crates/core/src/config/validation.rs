//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::{AppConfig, RouterConfig};
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - the router configuration is invalid (see [`RouterConfig::validate`])
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(invalid("max_bytes", "must be greater than 0"));
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(invalid("max_bytes", "must not exceed 50MB"));
        }

        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }

        self.router.validate()
    }
}

impl RouterConfig {
    /// Validate the routing policy.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `cache_name` or `shell_root` is empty
    /// - `live_data_prefix` does not start with `/`
    /// - `scope` is not an http(s) URL
    /// - a static asset cannot be resolved against `scope`
    /// - a document extension does not start with `.`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_name.trim().is_empty() {
            return Err(invalid("router.cache_name", "must not be empty"));
        }

        if !self.live_data_prefix.starts_with('/') {
            return Err(invalid("router.live_data_prefix", "must start with '/'"));
        }

        self.scope_url().map_err(|e| invalid("router.scope", e.to_string()))?;

        if self.shell_root.trim().is_empty() {
            return Err(invalid("router.shell_root", "must not be empty"));
        }
        self.shell_url().map_err(|e| invalid("router.shell_root", e.to_string()))?;

        for asset in &self.static_assets {
            self.resolve(asset)
                .map_err(|e| invalid("router.static_assets", e.to_string()))?;
        }

        if let Some(ext) = self.document_extensions.iter().find(|ext| !ext.starts_with('.')) {
            return Err(invalid("router.document_extensions", format!("'{ext}' must start with '.'")));
        }

        if !self
            .static_assets
            .iter()
            .any(|asset| self.resolve(asset).ok() == self.shell_url().ok())
        {
            tracing::warn!(
                shell_root = %self.shell_root,
                "shell_root is not precached; offline navigations have no fallback until it is fetched once"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_bytes_zero() {
        let config = AppConfig { max_bytes: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_bytes"));
    }

    #[test]
    fn test_validate_max_bytes_exceeds_limit() {
        let config = AppConfig { max_bytes: 51 * 1024 * 1024, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_bytes"));
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { timeout_ms: 301_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_empty_cache_name() {
        let router = RouterConfig { cache_name: "  ".into(), ..Default::default() };
        let result = router.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "router.cache_name"));
    }

    #[test]
    fn test_validate_live_data_prefix_needs_slash() {
        let router = RouterConfig { live_data_prefix: "db".into(), ..Default::default() };
        let result = router.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "router.live_data_prefix"));
    }

    #[test]
    fn test_validate_bad_scope() {
        let router = RouterConfig { scope: "not a url".into(), ..Default::default() };
        let result = router.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "router.scope"));
    }

    #[test]
    fn test_validate_unresolvable_asset() {
        let router = RouterConfig { static_assets: vec!["http://[::1".into()], ..Default::default() };
        let result = router.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "router.static_assets"));
    }

    #[test]
    fn test_validate_document_extension_needs_dot() {
        let router = RouterConfig { document_extensions: vec!["html".into()], ..Default::default() };
        let result = router.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "router.document_extensions"));
    }

    #[test]
    fn test_validate_empty_asset_list_is_allowed() {
        let router = RouterConfig { static_assets: Vec::new(), ..Default::default() };
        assert!(router.validate().is_ok());
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { max_bytes: 1, timeout_ms: 100, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_values() {
        let config = AppConfig { max_bytes: 50 * 1024 * 1024, timeout_ms: 300_000, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
