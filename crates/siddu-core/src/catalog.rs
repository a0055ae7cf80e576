//! Read-mostly catalogs: movies, award ceremonies, cricket matches.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  error::require,
  id::{AwardId, CricketMatchId, MovieId},
};

// ─── Movies ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
  pub id:           MovieId,
  pub title:        String,
  pub poster_url:   Option<String>,
  /// Platform rating on a 0 to 10 scale.
  pub sidduscore:   f64,
  pub genre:        Option<String>,
  pub release_date: Option<NaiveDate>,
  pub description:  Option<String>,
  pub director:     Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieFields {
  pub title:        String,
  pub poster_url:   Option<String>,
  #[serde(default)]
  pub sidduscore:   f64,
  pub genre:        Option<String>,
  pub release_date: Option<NaiveDate>,
  pub description:  Option<String>,
  pub director:     Option<String>,
}

impl MovieFields {
  pub fn validate(&self) -> Result<()> {
    require("title", &self.title)?;
    if !(0.0..=10.0).contains(&self.sidduscore) {
      return Err(Error::Invalid {
        field:  "sidduscore",
        reason: "must be between 0 and 10",
      });
    }
    Ok(())
  }
}

// ─── Awards ──────────────────────────────────────────────────────────────────

/// An award ceremony.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
  pub id:       AwardId,
  pub name:     String,
  pub year:     Option<i32>,
  pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardFields {
  pub name:     String,
  pub year:     Option<i32>,
  pub logo_url: Option<String>,
}

impl AwardFields {
  pub fn validate(&self) -> Result<()> { require("name", &self.name) }
}

// ─── Cricket ─────────────────────────────────────────────────────────────────

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
pub enum MatchStatus {
  #[default]
  Upcoming,
  Live,
  Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CricketMatch {
  pub id:     CricketMatchId,
  pub team1:  String,
  pub team2:  String,
  pub date:   Option<DateTime<Utc>>,
  pub venue:  Option<String>,
  pub status: MatchStatus,
  pub score:  Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CricketMatchFields {
  pub team1:  String,
  pub team2:  String,
  pub date:   Option<DateTime<Utc>>,
  pub venue:  Option<String>,
  #[serde(default)]
  pub status: MatchStatus,
  pub score:  Option<String>,
}

impl CricketMatchFields {
  pub fn validate(&self) -> Result<()> {
    require("team1", &self.team1)?;
    require("team2", &self.team2)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sidduscore_is_bounded() {
    let mut movie: MovieFields =
      serde_json::from_str(r#"{"title":"Baahubali","sidduscore":9.1}"#).unwrap();
    assert!(movie.validate().is_ok());
    movie.sidduscore = 11.0;
    assert!(movie.validate().is_err());
  }

  #[test]
  fn match_status_defaults_to_upcoming() {
    let fields: CricketMatchFields =
      serde_json::from_str(r#"{"team1":"IND","team2":"AUS"}"#).unwrap();
    assert_eq!(fields.status, MatchStatus::Upcoming);
  }
}
