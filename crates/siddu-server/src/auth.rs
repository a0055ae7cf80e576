//! Password hashing and the bearer-token extractor.

use std::sync::LazyLock;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use rand_core::OsRng;
use siddu_core::{id::UserId, store::VerseStore};

use crate::{AppState, error::Error};

/// Hash `password` into an argon2id PHC string.
///
/// CPU-bound; call from `spawn_blocking`.
pub fn hash_password(password: &str) -> Result<String, Error> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::Internal(format!("argon2 error: {e}")))
}

/// Whether `password` matches the stored PHC string. An unparseable hash
/// never matches.
pub fn verify_password(password: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

fn dummy_phc() -> Option<&'static str> {
  static DUMMY: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("siddu-verse-no-such-account").ok());
  DUMMY.as_deref()
}

/// Spend one argon2 verification on a throwaway hash, so a login for an
/// unknown email costs as much as one with a wrong password.
pub fn verify_unknown_account(password: &str) {
  if let Some(phc) = dummy_phc() {
    verify_password(password, phc);
  }
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
  let value = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or_else(|| Error::Unauthenticated("missing bearer token".into()))?;

  value
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .ok_or_else(|| Error::Unauthenticated("expected a bearer token".into()))
}

/// The authenticated caller. Present in a handler means the request carried
/// a valid session token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
  pub id: UserId,
}

impl<S> FromRequestParts<AppState<S>> for AuthUser
where
  S: VerseStore + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers)?;
    let id = state.tokens.validate(token).inspect_err(|e| {
      tracing::debug!(reason = %e, "rejected session token");
    })?;
    Ok(AuthUser { id })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::HeaderValue;

  fn headers(auth: &str) -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
    map
  }

  #[test]
  fn password_round_trip() {
    let phc = hash_password("correct horse").unwrap();
    assert!(phc.starts_with("$argon2id$"));
    assert!(verify_password("correct horse", &phc));
    assert!(!verify_password("wrong horse", &phc));
    assert!(!verify_password("correct horse", "not-a-phc-string"));
  }

  #[test]
  fn unknown_account_runs_a_real_verification() {
    let phc = dummy_phc().unwrap();
    assert!(phc.starts_with("$argon2id$"));
    assert!(verify_password("siddu-verse-no-such-account", phc));
    verify_unknown_account("anything");
  }

  #[test]
  fn bearer_extraction() {
    assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
    assert!(matches!(
      bearer_token(&headers("Basic dXNlcjpwYXNz")),
      Err(Error::Unauthenticated(_))
    ));
    assert!(matches!(
      bearer_token(&headers("Bearer ")),
      Err(Error::Unauthenticated(_))
    ));
    assert!(matches!(
      bearer_token(&HeaderMap::new()),
      Err(Error::Unauthenticated(_))
    ));
  }
}
