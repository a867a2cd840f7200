use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use serde::Deserialize;
use url::Url;

use crate::middleware::auth::{PathMatching, PathWhitelist};
use crate::service::auth::AuthConfig;
use crate::{Error, Result};

/// Default values for configuration options.
mod defaults {
    use crate::service::identity::GOOGLE_CERTS_URL;

    /// Default access token lifetime (15 minutes).
    pub const ACCESS_TOKEN_LIFETIME: u64 = 15 * 60;

    /// Default refresh token lifetime (7 days).
    pub const REFRESH_TOKEN_LIFETIME: u64 = 7 * 24 * 60 * 60;

    /// Default identity provider timeout in seconds.
    pub const IDENTITY_TIMEOUT: u64 = 10;

    /// Upper bound for the identity provider timeout in seconds.
    pub const MAX_IDENTITY_TIMEOUT: u64 = 300;

    /// Default federated key-set URL.
    pub fn google_certs_url() -> String {
        GOOGLE_CERTS_URL.to_owned()
    }

    /// Default anonymous-allowed paths.
    pub fn anonymous_paths() -> Vec<String> {
        vec![
            "/api/v1/users/login".to_owned(),
            "/api/v1/users/refresh".to_owned(),
        ]
    }

    /// Development access signing key.
    #[cfg(debug_assertions)]
    pub fn access_token_key() -> String {
        format!("dev-access-{}", "a".repeat(32))
    }

    /// Development refresh signing key.
    #[cfg(debug_assertions)]
    pub fn refresh_token_key() -> String {
        format!("dev-refresh-{}", "r".repeat(32))
    }
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Clone, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Secret used to sign access tokens.
    #[cfg_attr(feature = "config", arg(long, env = "ACCESS_TOKEN_KEY"))]
    pub access_token_key: String,

    /// Access token lifetime in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "ACCESS_TOKEN_LIFETIME", default_value = "900")
    )]
    #[builder(default = "defaults::ACCESS_TOKEN_LIFETIME")]
    pub access_token_lifetime: u64,

    /// Secret used to sign refresh tokens. Must differ from the access key.
    #[cfg_attr(feature = "config", arg(long, env = "REFRESH_TOKEN_KEY"))]
    pub refresh_token_key: String,

    /// Refresh token lifetime in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REFRESH_TOKEN_LIFETIME", default_value = "604800")
    )]
    #[builder(default = "defaults::REFRESH_TOKEN_LIFETIME")]
    pub refresh_token_lifetime: u64,

    /// OAuth client id that identity assertions must be issued for.
    #[cfg_attr(feature = "config", arg(long, env = "GOOGLE_CLIENT_ID"))]
    pub google_client_id: String,

    /// URL of the identity provider's published signing keys.
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "GOOGLE_CERTS_URL",
            default_value = "https://www.googleapis.com/oauth2/v3/certs"
        )
    )]
    #[builder(default = "defaults::google_certs_url()")]
    pub google_certs_url: String,

    /// Identity provider call timeout in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "IDENTITY_TIMEOUT", default_value = "10")
    )]
    #[builder(default = "defaults::IDENTITY_TIMEOUT")]
    pub identity_timeout: u64,

    /// Drops the `Secure` attribute from the refresh cookie.
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "DEVELOPMENT_MODE",
            default_value = "false",
            action = clap::ArgAction::Set
        )
    )]
    #[builder(default)]
    pub development_mode: bool,

    /// Installs the route guard. When disabled every request is anonymous.
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "SECURE_ENDPOINTS",
            default_value = "true",
            action = clap::ArgAction::Set
        )
    )]
    #[builder(default = "true")]
    pub secure_endpoints: bool,

    /// Paths served without credentials.
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "ANONYMOUS_PATHS",
            value_delimiter = ',',
            default_values_t = defaults::anonymous_paths()
        )
    )]
    #[builder(default = "defaults::anonymous_paths()")]
    pub anonymous_paths: Vec<String>,

    /// How request paths are compared against the anonymous paths.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "PATH_MATCHING", value_enum, default_value_t = PathMatching::Suffix)
    )]
    #[builder(default)]
    #[serde(default)]
    pub path_matching: PathMatching,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Returns the signing and cookie configuration.
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            access_signing_key: self.access_token_key.clone(),
            access_lifetime_secs: self.access_token_lifetime,
            refresh_signing_key: self.refresh_token_key.clone(),
            refresh_lifetime_secs: self.refresh_token_lifetime,
            federated_client_id: self.google_client_id.clone(),
            is_development_mode: self.development_mode,
        }
    }

    /// Returns the anonymous-allowed path set.
    pub fn path_whitelist(&self) -> PathWhitelist {
        PathWhitelist::new(&self.anonymous_paths, self.path_matching)
    }

    /// Returns the identity provider call timeout.
    #[inline]
    pub fn identity_timeout(&self) -> Duration {
        Duration::from_secs(self.identity_timeout)
    }

    /// Parses the identity provider's key-set URL.
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless the URL is absolute `http(s)`.
    pub fn google_certs_url(&self) -> Result<Url> {
        let url = Url::parse(&self.google_certs_url)
            .map_err(|e| Error::config("Invalid Google certs URL").with_source(e))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(Error::config("Google certs URL must use http or https")),
        }
    }

    /// Validates all configuration values.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any value is invalid; see
    /// [`AuthConfig::validate`] for the signing rules.
    pub fn validate(&self) -> Result<()> {
        self.auth_config().validate()?;
        self.google_certs_url()?;

        if self.identity_timeout == 0 || self.identity_timeout > defaults::MAX_IDENTITY_TIMEOUT {
            return Err(Error::config(format!(
                "Identity timeout must be between 1 and {} seconds",
                defaults::MAX_IDENTITY_TIMEOUT
            )));
        }

        Ok(())
    }
}

impl ServiceConfigBuilder {
    /// Wrapper for builder validation that returns String errors.
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if let (Some(access), Some(refresh)) = (&builder.access_token_key, &builder.refresh_token_key)
        {
            if access.is_empty() || refresh.is_empty() {
                return Err("Signing keys cannot be empty".to_string());
            }

            if access == refresh {
                return Err("Access and refresh signing keys must be different".to_string());
            }
        }

        if let Some(client_id) = &builder.google_client_id
            && client_id.trim().is_empty()
        {
            return Err("Google client id cannot be empty".to_string());
        }

        if let Some(url) = &builder.google_certs_url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            return Err("Google certs URL must start with 'http://' or 'https://'".to_string());
        }

        if let Some(timeout_secs) = &builder.identity_timeout {
            if *timeout_secs < 1 {
                return Err("Identity timeout must be at least 1 second".to_string());
            }
            if *timeout_secs > defaults::MAX_IDENTITY_TIMEOUT {
                return Err("Identity timeout cannot exceed 300 seconds".to_string());
            }
        }

        for (name, lifetime) in [
            ("Access", &builder.access_token_lifetime),
            ("Refresh", &builder.refresh_token_lifetime),
        ] {
            if lifetime == &Some(0) {
                return Err(format!("{name} token lifetime must be greater than 0"));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("access_token_lifetime", &self.access_token_lifetime)
            .field("refresh_token_lifetime", &self.refresh_token_lifetime)
            .field("google_client_id", &self.google_client_id)
            .field("google_certs_url", &self.google_certs_url)
            .field("identity_timeout", &self.identity_timeout)
            .field("development_mode", &self.development_mode)
            .field("secure_endpoints", &self.secure_endpoints)
            .field("anonymous_paths", &self.anonymous_paths)
            .field("path_matching", &self.path_matching)
            .finish_non_exhaustive()
    }
}

#[cfg(debug_assertions)]
impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            access_token_key: defaults::access_token_key(),
            access_token_lifetime: defaults::ACCESS_TOKEN_LIFETIME,
            refresh_token_key: defaults::refresh_token_key(),
            refresh_token_lifetime: defaults::REFRESH_TOKEN_LIFETIME,
            google_client_id: "habits-dev.apps.googleusercontent.com".to_owned(),
            google_certs_url: defaults::google_certs_url(),
            identity_timeout: defaults::IDENTITY_TIMEOUT,
            development_mode: true,
            secure_endpoints: true,
            anonymous_paths: defaults::anonymous_paths(),
            path_matching: PathMatching::default(),
        }
    }
}
