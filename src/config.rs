use std::fmt;

use ::http::HeaderValue;

use crate::error::FigmaError;

/// Canonical base URL of the Figma REST API, including the version prefix.
///
/// Every request URL is composed from this value (via [`ApiConfig`]); it must
/// not be repeated anywhere else in the crate.
pub const API_BASE_URL: &str = "https://api.figma.com/v1";

/// Environment variable holding the personal access token.
pub const TOKEN_ENV_VAR: &str = "FIGMA_TOKEN";

/// Personal access token used to authenticate every request
///
/// The token is immutable once constructed and is never printed: both
/// `Debug` and `Display` render a redacted placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    /// Wraps a token, rejecting blank values and values that cannot be sent
    /// as an HTTP header (control or non-ASCII characters)
    pub fn new(token: impl Into<String>) -> Result<Self, FigmaError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(FigmaError::Configuration(format!(
                "{TOKEN_ENV_VAR} environment variable is empty"
            )));
        }
        if !token.is_ascii() || HeaderValue::from_str(&token).is_err() {
            return Err(FigmaError::Configuration(format!(
                "{TOKEN_ENV_VAR} contains characters that are not allowed in an HTTP header"
            )));
        }
        Ok(Self { token })
    }

    /// Raw token value, only meant for the authentication header
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// TLS certificate verification mode for the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsVerification {
    /// Verify server certificates against the system trust store
    #[default]
    Strict,
    /// Accept any certificate. Only enabled through `--insecure`.
    Disabled,
}

/// Immutable settings handed to the request builder at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub credentials: Credentials,
}

impl ApiConfig {
    /// Settings pointing at the canonical API host
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            credentials,
        }
    }

    /// Overrides the base URL (used to target a local test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Process-level configuration assembled at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub tls: TlsVerification,
}

impl Config {
    /// Reads the token from the process environment
    ///
    /// # Errors
    /// Returns [`FigmaError::Configuration`] when `FIGMA_TOKEN` is unset,
    /// blank, or not usable as an HTTP header value.
    pub fn from_env(tls: TlsVerification) -> Result<Self, FigmaError> {
        Self::from_lookup(|key| std::env::var(key).ok(), tls)
    }

    /// Builds the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F, tls: TlsVerification) -> Result<Self, FigmaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV_VAR).ok_or_else(|| {
            FigmaError::Configuration(format!("{TOKEN_ENV_VAR} environment variable not set"))
        })?;
        let credentials = Credentials::new(token)?;
        Ok(Self {
            api: ApiConfig::new(credentials),
            tls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup_reads_token() {
        let config = Config::from_lookup(
            |key| (key == TOKEN_ENV_VAR).then(|| "secret-token".to_string()),
            TlsVerification::Strict,
        )
        .unwrap();
        assert_eq!(config.api.credentials.token(), "secret-token");
        assert_eq!(config.api.base_url, API_BASE_URL);
        assert_eq!(config.tls, TlsVerification::Strict);
    }

    #[test]
    fn test_missing_token_is_configuration_error() {
        let result = Config::from_lookup(|_| None, TlsVerification::Strict);
        match result {
            Err(FigmaError::Configuration(msg)) => assert!(msg.contains("FIGMA_TOKEN")),
            other => panic!("Expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_token_is_configuration_error() {
        let result = Config::from_lookup(|_| Some("   ".to_string()), TlsVerification::Strict);
        assert!(matches!(result, Err(FigmaError::Configuration(_))));
    }

    #[test]
    fn test_token_must_be_a_valid_header_value() {
        for token in ["figd_tök\u{1}en", "figd_\u{7f}", "figd_tök"] {
            match Credentials::new(token) {
                Err(FigmaError::Configuration(msg)) => {
                    assert!(msg.contains("FIGMA_TOKEN"));
                    assert!(!msg.contains("figd_"));
                }
                other => panic!("Expected configuration error for {token:?}, got {other:?}"),
            }
        }

        let result = Config::from_lookup(
            |_| Some("figd_bad\ttoken\u{0}".to_string()),
            TlsVerification::Strict,
        );
        assert!(matches!(result, Err(FigmaError::Configuration(_))));
    }

    #[test]
    fn test_credentials_are_redacted() {
        let creds = Credentials::new("figd_very_secret").unwrap();
        assert!(!format!("{creds:?}").contains("figd_very_secret"));
        assert!(!creds.to_string().contains("figd_very_secret"));
    }

    #[test]
    fn test_tls_defaults_to_strict() {
        assert_eq!(TlsVerification::default(), TlsVerification::Strict);
    }
}
