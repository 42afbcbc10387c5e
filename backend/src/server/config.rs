//! Server configuration loaded via OrthoConfig.
//!
//! Values layer CLI arguments over `DOCSMITH_`-prefixed environment
//! variables; every field is optional with a production-safe default behind
//! an accessor.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8081/api/generate";
// Mirrors the request timeout the generation service itself advertises.
const DEFAULT_BACKEND_TIMEOUT_SECONDS: u64 = 60;
const DEFAULT_GENERATION_MODEL: &str = "gpt-4";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Configuration values controlling the HTTP server and its collaborators.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DOCSMITH")]
pub struct Settings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Endpoint of the external documentation-generation service.
    pub backend_url: Option<String>,
    /// Whole-request timeout for generation calls, in seconds.
    pub backend_timeout_seconds: Option<u64>,
    /// Model identifier recorded with each archived generation.
    pub generation_model: Option<String>,
    /// Path to the session cookie signing key.
    pub session_key_file: Option<PathBuf>,
    /// Permit an ephemeral session key outside debug builds.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Set the `Secure` flag on the session cookie.
    pub cookie_secure: Option<bool>,
}

impl Settings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Return the configured backend endpoint, falling back to the default.
    pub fn backend_url(&self) -> Result<Url, url::ParseError> {
        self.backend_url
            .as_deref()
            .unwrap_or(DEFAULT_BACKEND_URL)
            .parse()
    }

    /// Return the backend request timeout.
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(
            self.backend_timeout_seconds
                .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECONDS),
        )
    }

    /// Return the model identifier recorded into archive records.
    pub fn generation_model(&self) -> &str {
        self.generation_model
            .as_deref()
            .unwrap_or(DEFAULT_GENERATION_MODEL)
    }

    /// Return the configured session key path, falling back to the default.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether the session cookie carries the `Secure` flag. Defaults on.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration defaults.

    use super::*;

    fn empty_settings() -> Settings {
        Settings {
            bind_addr: None,
            backend_url: None,
            backend_timeout_seconds: None,
            generation_model: None,
            session_key_file: None,
            session_allow_ephemeral: false,
            cookie_secure: None,
        }
    }

    #[test]
    fn defaults_are_used_when_fields_are_missing() {
        let settings = empty_settings();
        assert!(settings.cookie_secure());
        assert_eq!(
            settings.bind_addr().expect("default addr parses").port(),
            8080
        );
        assert_eq!(
            settings.backend_url().expect("default url parses").path(),
            "/api/generate"
        );
        assert_eq!(settings.backend_timeout(), Duration::from_secs(60));
        assert_eq!(settings.generation_model(), "gpt-4");
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
    }

    #[test]
    fn explicit_values_override_defaults() {
        let settings = Settings {
            bind_addr: Some("127.0.0.1:9000".to_owned()),
            backend_url: Some("https://generator.internal/api/generate".to_owned()),
            backend_timeout_seconds: Some(5),
            generation_model: Some("gpt-4o".to_owned()),
            ..empty_settings()
        };
        assert_eq!(
            settings.bind_addr().expect("addr parses").port(),
            9000
        );
        assert_eq!(
            settings.backend_url().expect("url parses").host_str(),
            Some("generator.internal")
        );
        assert_eq!(settings.backend_timeout(), Duration::from_secs(5));
        assert_eq!(settings.generation_model(), "gpt-4o");
    }

    #[test]
    fn malformed_bind_addr_is_reported() {
        let settings = Settings {
            bind_addr: Some("not-an-addr".to_owned()),
            ..empty_settings()
        };
        assert!(settings.bind_addr().is_err());
    }
}
