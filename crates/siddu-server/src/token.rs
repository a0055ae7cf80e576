//! Session tokens: HS256 JWTs carrying the user id.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
  Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
  errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use siddu_core::id::UserId;
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
  pub user_id: UserId,
  pub iat:     i64,
  pub exp:     i64,
}

/// Why a presented token was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
  #[error("token has expired")]
  Expired,
  #[error("malformed token")]
  Malformed,
  #[error("token signed with an unexpected algorithm")]
  WrongAlgorithm,
}

#[derive(Debug, Error)]
pub enum TokenError {
  #[error("failed to sign token: {0}")]
  Sign(#[from] jsonwebtoken::errors::Error),
  #[error("token lifetime overflows the expiry timestamp")]
  ExpiryOutOfRange,
}

pub struct TokenService {
  encoding: EncodingKey,
  decoding: DecodingKey,
  ttl:      Duration,
}

impl TokenService {
  pub fn new(secret: &[u8], ttl: Duration) -> Self {
    Self {
      encoding: EncodingKey::from_secret(secret),
      decoding: DecodingKey::from_secret(secret),
      ttl,
    }
  }

  pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
    self.issue_at(user_id, Utc::now())
  }

  fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, TokenError> {
    let exp = now
      .checked_add_signed(self.ttl)
      .ok_or(TokenError::ExpiryOutOfRange)?;
    let claims = Claims {
      user_id,
      iat: now.timestamp(),
      exp: exp.timestamp(),
    };
    Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
  }

  /// Verify signature, algorithm and expiry with zero leeway.
  pub fn validate(&self, token: &str) -> Result<UserId, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    decode::<Claims>(token, &self.decoding, &validation)
      .map(|data| data.claims.user_id)
      .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidAlgorithm => AuthError::WrongAlgorithm,
        _ => AuthError::Malformed,
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn service() -> TokenService {
    TokenService::new(b"unit-test-secret", Duration::hours(24))
  }

  #[test]
  fn issued_token_validates() {
    let tokens = service();
    let token = tokens.issue(UserId(42)).unwrap();
    assert_eq!(tokens.validate(&token), Ok(UserId(42)));
  }

  #[test]
  fn expired_token_is_rejected() {
    let tokens = service();
    let token = tokens
      .issue_at(UserId(1), Utc::now() - Duration::hours(25))
      .unwrap();
    assert_eq!(tokens.validate(&token), Err(AuthError::Expired));
  }

  #[test]
  fn unrepresentable_expiry_is_an_error() {
    let tokens = TokenService::new(b"k", Duration::hours(i64::from(u32::MAX)));
    assert!(matches!(
      tokens.issue(UserId(1)),
      Err(TokenError::ExpiryOutOfRange)
    ));
  }

  #[test]
  fn other_algorithm_is_rejected() {
    let claims = Claims {
      user_id: UserId(1),
      iat:     Utc::now().timestamp(),
      exp:     (Utc::now() + Duration::hours(1)).timestamp(),
    };
    let token = encode(
      &Header::new(Algorithm::HS512),
      &claims,
      &EncodingKey::from_secret(b"unit-test-secret"),
    )
    .unwrap();
    assert_eq!(service().validate(&token), Err(AuthError::WrongAlgorithm));
  }

  #[test]
  fn garbage_and_foreign_tokens_are_malformed() {
    let tokens = service();
    assert_eq!(tokens.validate("not.a.jwt"), Err(AuthError::Malformed));
    assert_eq!(tokens.validate(""), Err(AuthError::Malformed));

    let foreign = TokenService::new(b"someone-else", Duration::hours(1))
      .issue(UserId(1))
      .unwrap();
    assert_eq!(tokens.validate(&foreign), Err(AuthError::Malformed));
  }
}
