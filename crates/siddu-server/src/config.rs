//! Runtime configuration, deserialised from `config.toml` and `SIDDU_*`
//! environment variables.

use std::path::PathBuf;

use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

/// Signing secret used when none is configured in development.
pub const DEV_FALLBACK_SECRET: &str = "siddu-verse-development-secret";

/// Longest accepted session lifetime: one year.
pub const MAX_TOKEN_TTL_HOURS: u32 = 24 * 366;

/// Deployment environment. Only `development` may run without a configured
/// signing secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
  Development,
  #[default]
  Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:            String,
  #[serde(default = "default_port")]
  pub port:            u16,
  #[serde(default = "default_store_path")]
  pub store_path:      PathBuf,
  /// HS256 key for session tokens.
  #[serde(default)]
  pub jwt_secret:      Option<String>,
  #[serde(default = "default_token_ttl_hours")]
  pub token_ttl_hours: u32,
  #[serde(default)]
  pub environment:     Environment,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("siddu.db") }
fn default_token_ttl_hours() -> u32 { 24 }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:            default_host(),
      port:            default_port(),
      store_path:      default_store_path(),
      jwt_secret:      None,
      token_ttl_hours: default_token_ttl_hours(),
      environment:     Environment::default(),
    }
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("jwt_secret is not configured (set SIDDU_JWT_SECRET)")]
  MissingSecret,
  #[error("the development fallback secret cannot be used in production")]
  FallbackSecretInProduction,
  #[error("token_ttl_hours must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {0}")]
  TokenTtlOutOfRange(u32),
}

impl ServerConfig {
  /// The secret session tokens are signed with.
  ///
  /// A blank `jwt_secret` counts as missing.
  pub fn signing_secret(&self) -> Result<String, ConfigError> {
    let configured = self
      .jwt_secret
      .as_deref()
      .map(str::trim)
      .filter(|s| !s.is_empty());

    match (configured, self.environment) {
      (Some(secret), Environment::Production) if secret == DEV_FALLBACK_SECRET => {
        Err(ConfigError::FallbackSecretInProduction)
      }
      (Some(secret), _) => Ok(secret.to_owned()),
      (None, Environment::Development) => {
        tracing::warn!(
          "jwt_secret is not set; signing tokens with the development fallback secret"
        );
        Ok(DEV_FALLBACK_SECRET.to_owned())
      }
      (None, Environment::Production) => Err(ConfigError::MissingSecret),
    }
  }

  /// How long an issued session token stays valid.
  pub fn token_ttl(&self) -> Result<Duration, ConfigError> {
    match self.token_ttl_hours {
      hours @ 1..=MAX_TOKEN_TTL_HOURS => Ok(Duration::hours(i64::from(hours))),
      hours => Err(ConfigError::TokenTtlOutOfRange(hours)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn with(secret: Option<&str>, environment: Environment) -> ServerConfig {
    ServerConfig {
      jwt_secret: secret.map(str::to_owned),
      environment,
      ..ServerConfig::default()
    }
  }

  #[test]
  fn defaults() {
    let cfg = ServerConfig::default();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.token_ttl_hours, 24);
    assert_eq!(cfg.environment, Environment::Production);
  }

  #[test]
  fn production_requires_a_secret() {
    let cfg = with(None, Environment::Production);
    assert_eq!(cfg.signing_secret(), Err(ConfigError::MissingSecret));

    let blank = with(Some("   "), Environment::Production);
    assert_eq!(blank.signing_secret(), Err(ConfigError::MissingSecret));
  }

  #[test]
  fn production_rejects_fallback_secret() {
    let cfg = with(Some(DEV_FALLBACK_SECRET), Environment::Production);
    assert_eq!(cfg.signing_secret(), Err(ConfigError::FallbackSecretInProduction));
  }

  #[test]
  fn development_falls_back() {
    let cfg = with(None, Environment::Development);
    assert_eq!(cfg.signing_secret().unwrap(), DEV_FALLBACK_SECRET);
  }

  #[test]
  fn token_ttl_bounds() {
    let ttl = |hours| {
      ServerConfig {
        token_ttl_hours: hours,
        ..ServerConfig::default()
      }
      .token_ttl()
    };

    assert_eq!(ttl(24), Ok(Duration::hours(24)));
    assert_eq!(ttl(MAX_TOKEN_TTL_HOURS), Ok(Duration::hours(24 * 366)));
    assert_eq!(ttl(0), Err(ConfigError::TokenTtlOutOfRange(0)));
    assert_eq!(ttl(u32::MAX), Err(ConfigError::TokenTtlOutOfRange(u32::MAX)));
  }

  #[test]
  fn configured_secret_wins() {
    let cfg = with(Some("s3cret"), Environment::Production);
    assert_eq!(cfg.signing_secret().unwrap(), "s3cret");
  }
}
