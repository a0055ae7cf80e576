//! User accounts and credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, error::require, id::UserId};

/// What a user is allowed to do beyond acting on their own resources.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::AsRefStr,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  #[default]
  User,
  Creator,
  /// May create and edit the movie, award and cricket catalogs.
  Admin,
}

/// A registered account. The password hash is never serialised.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id:            UserId,
  pub username:      String,
  pub email:         String,
  #[serde(skip)]
  pub password_hash: String,
  pub avatar_url:    Option<String>,
  pub role:          Role,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

/// The public face of a user embedded in other resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
  pub id:         UserId,
  pub username:   String,
  pub avatar_url: Option<String>,
}

/// Input to [`crate::store::VerseStore::create_user`]. The password must
/// already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub username:      String,
  /// Lowercased before it reaches the store.
  pub email:         String,
  pub password_hash: String,
  pub role:          Role,
}

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Check registration input before the password is hashed.
pub fn validate_registration(
  username: &str,
  email: &str,
  password: &str,
) -> Result<()> {
  require("username", username)?;
  require("email", email)?;
  if !email.contains('@') {
    return Err(Error::Invalid {
      field:  "email",
      reason: "must be an email address",
    });
  }
  if password.chars().count() < MIN_PASSWORD_LEN {
    return Err(Error::Invalid {
      field:  "password",
      reason: "must be at least 8 characters",
    });
  }
  Ok(())
}

/// Emails compare case-insensitively everywhere.
pub fn normalize_email(email: &str) -> String {
  email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn registration_requires_all_fields() {
    assert!(validate_registration("alice", "alice@x.com", "password123").is_ok());
    assert!(validate_registration("  ", "alice@x.com", "password123").is_err());
    assert!(validate_registration("alice", "alice.x.com", "password123").is_err());
    assert!(validate_registration("alice", "alice@x.com", "short").is_err());
  }

  #[test]
  fn role_text_encoding() {
    assert_eq!(Role::Admin.as_ref(), "admin");
    assert_eq!("creator".parse::<Role>().unwrap(), Role::Creator);
  }

  #[test]
  fn password_hash_is_not_serialised() {
    let user = User {
      id:            UserId(1),
      username:      "alice".into(),
      email:         "alice@x.com".into(),
      password_hash: "$argon2id$secret".into(),
      avatar_url:    None,
      role:          Role::User,
      created_at:    Utc::now(),
      updated_at:    Utc::now(),
    };
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("passwordHash").is_none());
    assert_eq!(json["username"], "alice");
  }
}
