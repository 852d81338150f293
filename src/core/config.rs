//! Configuration management for the MCP server.
//!
//! Configuration is loaded from environment variables (with `.env` support
//! via dotenvy). The Supabase connection values are hard requirements;
//! everything else has sensible defaults.

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Remote service connection configuration.
    pub supabase: SupabaseConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Connection values for the Supabase REST API.
#[derive(Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub url: String,

    /// Service-role credential sent with every request.
    pub service_role_key: String,
}

/// Custom Debug implementation to redact the credential from logs.
impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("service_role_key", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `SUPABASE_URL` and `SUPABASE_SERVICE_ROLE_KEY` are required; startup
    /// fails with a configuration error when either is absent. Optional:
    /// `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let url = non_empty_var("SUPABASE_URL");
        let service_role_key = non_empty_var("SUPABASE_SERVICE_ROLE_KEY");

        let (Some(url), Some(service_role_key)) = (url, service_role_key) else {
            return Err(Error::config(
                "Missing required environment variables: \
                 SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY must be set",
            ));
        };

        let name = std::env::var("MCP_SERVER_NAME")
            .unwrap_or_else(|_| "supabase-mcp".to_string());
        let level = std::env::var("MCP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            server: ServerConfig {
                name,
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig { level },
            supabase: SupabaseConfig {
                url,
                service_role_key,
            },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn set_required_vars() {
        unsafe {
            std::env::set_var("SUPABASE_URL", "https://test.supabase.co");
            std::env::set_var("SUPABASE_SERVICE_ROLE_KEY", "test_key_12345");
        }
    }

    fn clear_all_vars() {
        unsafe {
            std::env::remove_var("SUPABASE_URL");
            std::env::remove_var("SUPABASE_SERVICE_ROLE_KEY");
            std::env::remove_var("MCP_SERVER_NAME");
            std::env::remove_var("MCP_LOG_LEVEL");
        }
    }

    #[test]
    fn test_from_env_with_credentials() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_all_vars();
        set_required_vars();

        let config = Config::from_env().unwrap();
        assert_eq!(config.supabase.url, "https://test.supabase.co");
        assert_eq!(config.supabase.service_role_key, "test_key_12345");
        assert_eq!(config.server.name, "supabase-mcp");
        assert_eq!(config.logging.level, "info");
        clear_all_vars();
    }

    #[test]
    fn test_from_env_missing_credentials() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_all_vars();

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));
        assert!(err.to_string().contains("SUPABASE_SERVICE_ROLE_KEY"));
    }

    #[test]
    fn test_from_env_blank_credential_is_missing() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_all_vars();
        unsafe {
            std::env::set_var("SUPABASE_URL", "  ");
            std::env::set_var("SUPABASE_SERVICE_ROLE_KEY", "key");
        }

        assert!(Config::from_env().is_err());
        clear_all_vars();
    }

    #[test]
    fn test_from_env_overrides() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_all_vars();
        set_required_vars();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "custom-name");
            std::env::set_var("MCP_LOG_LEVEL", "debug");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.server.name, "custom-name");
        assert_eq!(config.logging.level, "debug");
        clear_all_vars();
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let config = SupabaseConfig {
            url: "https://test.supabase.co".to_string(),
            service_role_key: "super_secret_key".to_string(),
        };
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
