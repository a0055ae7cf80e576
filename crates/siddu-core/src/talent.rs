//! Talent profiles and the records hanging off them.
//!
//! A profile belongs to exactly one user and a user has at most one profile.
//! Skills, experiences and portfolio items are always addressed through their
//! owning profile.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  error::require,
  id::{ExperienceId, PortfolioItemId, ProfileId, SkillId, UserId},
};

// ─── Profile ─────────────────────────────────────────────────────────────────

/// A professional profile, distinct from the base user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentProfile {
  pub id:              ProfileId,
  /// The owning user. Never changes after creation.
  pub user_id:         UserId,
  pub full_name:       String,
  pub headline:        Option<String>,
  pub bio:             Option<String>,
  pub avatar_url:      Option<String>,
  pub cover_image_url: Option<String>,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

/// The editable fields of a profile, used both on create and on update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
  pub full_name:       String,
  /// e.g. "Actor | Director | Writer".
  pub headline:        Option<String>,
  pub bio:             Option<String>,
  pub avatar_url:      Option<String>,
  pub cover_image_url: Option<String>,
}

impl ProfileFields {
  pub fn validate(&self) -> Result<()> { require("fullName", &self.full_name) }
}

/// A profile with all of its child records loaded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetail {
  #[serde(flatten)]
  pub profile:     TalentProfile,
  pub skills:      Vec<Skill>,
  pub experiences: Vec<Experience>,
  pub portfolio:   Vec<PortfolioItem>,
}

// ─── Skills ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
  pub id:                SkillId,
  pub talent_profile_id: ProfileId,
  pub name:              String,
  /// e.g. "Expert", "Intermediate".
  pub proficiency:       Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSkill {
  pub name:        String,
  pub proficiency: Option<String>,
}

impl NewSkill {
  pub fn validate(&self) -> Result<()> { require("name", &self.name) }
}

// ─── Experience ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
  pub id:                ExperienceId,
  pub talent_profile_id: ProfileId,
  pub title:             String,
  pub company_name:      Option<String>,
  pub start_date:        NaiveDate,
  /// `None` while the engagement is ongoing.
  pub end_date:          Option<NaiveDate>,
  pub description:       Option<String>,
}

/// Body of both the add and the update experience endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceFields {
  pub title:        String,
  pub company_name: Option<String>,
  pub start_date:   NaiveDate,
  pub end_date:     Option<NaiveDate>,
  pub description:  Option<String>,
}

impl ExperienceFields {
  pub fn validate(&self) -> Result<()> {
    require("title", &self.title)?;
    if let Some(end) = self.end_date
      && end < self.start_date
    {
      return Err(Error::Invalid {
        field:  "endDate",
        reason: "must not precede startDate",
      });
    }
    Ok(())
  }
}

// ─── Portfolio ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
  pub id:                PortfolioItemId,
  pub talent_profile_id: ProfileId,
  pub title:             String,
  pub description:       Option<String>,
  /// URL of the video, image or audio clip.
  pub media_url:         String,
  pub media_type:        Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolioItem {
  pub title:       String,
  pub description: Option<String>,
  pub media_url:   String,
  pub media_type:  Option<String>,
}

impl NewPortfolioItem {
  pub fn validate(&self) -> Result<()> {
    require("title", &self.title)?;
    require("mediaUrl", &self.media_url)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn experience(start: &str, end: Option<&str>) -> ExperienceFields {
    ExperienceFields {
      title:        "Lead".into(),
      company_name: None,
      start_date:   start.parse().unwrap(),
      end_date:     end.map(|e| e.parse().unwrap()),
      description:  None,
    }
  }

  #[test]
  fn experience_end_must_not_precede_start() {
    assert!(experience("2020-01-01", None).validate().is_ok());
    assert!(experience("2020-01-01", Some("2020-01-01")).validate().is_ok());
    assert!(matches!(
      experience("2020-01-01", Some("2019-12-31")).validate(),
      Err(Error::Invalid { field: "endDate", .. })
    ));
  }

  #[test]
  fn profile_requires_full_name() {
    let fields: ProfileFields =
      serde_json::from_str(r#"{"fullName":"  ","headline":"Actor"}"#).unwrap();
    assert!(fields.validate().is_err());
  }
}
