//! Casting calls, their roles, and the applications talent submit to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  error::require,
  id::{ApplicationId, CastingCallId, CastingRoleId, ProfileId, UserId},
  user::UserSummary,
};

// ─── Casting calls ───────────────────────────────────────────────────────────

/// A job posting seeking talent for a production.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastingCall {
  pub id:                CastingCallId,
  /// The recruiter. Never changes after creation.
  pub posted_by_user_id: UserId,
  pub project_title:     String,
  /// e.g. "Feature Film", "Short Film", "Web Series".
  pub project_type:      Option<String>,
  pub description:       Option<String>,
  /// Inactive calls no longer accept applications.
  pub is_active:         bool,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

/// A specific part within a casting call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastingRole {
  pub id:              CastingRoleId,
  pub casting_call_id: CastingCallId,
  pub role_name:       String,
  pub description:     Option<String>,
  /// Free text, e.g. "Age: 25-35, Height: 6'0\"".
  pub requirements:    Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCastingRole {
  pub role_name:    String,
  pub description:  Option<String>,
  pub requirements: Option<String>,
}

/// Body of `POST /talent/casting-calls`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCastingCall {
  pub project_title: String,
  pub project_type:  Option<String>,
  pub description:   Option<String>,
  #[serde(default)]
  pub roles:         Vec<NewCastingRole>,
}

impl NewCastingCall {
  pub fn validate(&self) -> Result<()> {
    require("projectTitle", &self.project_title)?;
    self
      .roles
      .iter()
      .try_for_each(|r| require("roleName", &r.role_name))
  }
}

/// Partial update of a casting call; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastingCallUpdate {
  pub project_title: Option<String>,
  pub project_type:  Option<String>,
  pub description:   Option<String>,
  pub is_active:     Option<bool>,
}

impl CastingCallUpdate {
  pub fn validate(&self) -> Result<()> {
    match &self.project_title {
      Some(title) => require("projectTitle", title),
      None => Ok(()),
    }
  }
}

/// A casting call with its poster and roles resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastingCallDetail {
  #[serde(flatten)]
  pub call:      CastingCall,
  pub posted_by: UserSummary,
  pub roles:     Vec<CastingRole>,
}

// ─── Applications ────────────────────────────────────────────────────────────

/// Where an application stands in the recruiter's pipeline.
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
pub enum ApplicationStatus {
  #[default]
  Pending,
  Shortlisted,
  Rejected,
  Hired,
}

/// A talent profile's application to a casting call. At most one exists per
/// (profile, casting call) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
  pub id:                ApplicationId,
  pub talent_profile_id: ProfileId,
  pub casting_call_id:   CastingCallId,
  pub status:            ApplicationStatus,
  pub cover_letter:      Option<String>,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

/// Input to [`crate::store::VerseStore::create_application`].
#[derive(Debug, Clone)]
pub struct NewApplication {
  pub talent_profile_id: ProfileId,
  pub casting_call_id:   CastingCallId,
  pub cover_letter:      Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_rejects_unknown_values() {
    assert!(serde_json::from_str::<ApplicationStatus>(r#""hired""#).is_ok());
    assert!(serde_json::from_str::<ApplicationStatus>(r#""promoted""#).is_err());
  }

  #[test]
  fn roles_must_be_named() {
    let call: NewCastingCall = serde_json::from_str(
      r#"{"projectTitle":"Dune 3","roles":[{"roleName":""}]}"#,
    )
    .unwrap();
    assert!(call.validate().is_err());
  }

  #[test]
  fn update_with_blank_title_is_invalid() {
    let update = CastingCallUpdate {
      project_title: Some(" ".into()),
      ..Default::default()
    };
    assert!(update.validate().is_err());
    assert!(CastingCallUpdate::default().validate().is_ok());
  }
}
