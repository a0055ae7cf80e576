//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with fixed microsecond
//! precision, calendar dates as `YYYY-MM-DD`, and enums as their lowercase
//! names. Row mappers decode inside the rusqlite closure and surface bad
//! column text as [`rusqlite::Error::FromSqlConversionFailure`].

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{Row, types::Type};
use siddu_core::{
  casting::{Application, CastingCall, CastingRole},
  catalog::{Award, CricketMatch, Movie},
  id::{
    ApplicationId, AwardId, CastingCallId, CastingRoleId, CommentId,
    CricketMatchId, ExperienceId, MovieId, PortfolioItemId, ProfileId,
    PulseId, SkillId, UserId,
  },
  social::{Comment, OwnerRef, Pulse},
  talent::{Experience, PortfolioItem, Skill, TalentProfile},
  user::{User, UserSummary},
};

use crate::Result;

// ─── Text columns ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

/// Parse a `TEXT NOT NULL` column through the type's `FromStr`.
pub fn parse_col<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  let raw: String = row.get(idx)?;
  raw
    .parse()
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse a nullable `TEXT` column through the type's `FromStr`.
pub fn parse_opt_col<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>>
where
  T: FromStr,
  T::Err: std::error::Error + Send + Sync + 'static,
{
  let raw: Option<String> = row.get(idx)?;
  raw
    .map(|s| {
      s.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
      })
    })
    .transpose()
}

/// Whether an insert failed only because a UNIQUE constraint rejected it.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub const USER_COLS: &str =
  "id, username, email, password_hash, avatar_url, role, created_at, updated_at";

pub fn user_row(row: &Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:            UserId(row.get(0)?),
    username:      row.get(1)?,
    email:         row.get(2)?,
    password_hash: row.get(3)?,
    avatar_url:    row.get(4)?,
    role:          parse_col(row, 5)?,
    created_at:    parse_col(row, 6)?,
    updated_at:    parse_col(row, 7)?,
  })
}

/// Expects `id, username, avatar_url` starting at `offset`.
pub fn user_summary_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<UserSummary> {
  Ok(UserSummary {
    id:         UserId(row.get(offset)?),
    username:   row.get(offset + 1)?,
    avatar_url: row.get(offset + 2)?,
  })
}

// ─── Talent ──────────────────────────────────────────────────────────────────

pub const PROFILE_COLS: &str = "id, user_id, full_name, headline, bio, \
  avatar_url, cover_image_url, created_at, updated_at";

pub fn profile_row(row: &Row<'_>) -> rusqlite::Result<TalentProfile> {
  Ok(TalentProfile {
    id:              ProfileId(row.get(0)?),
    user_id:         UserId(row.get(1)?),
    full_name:       row.get(2)?,
    headline:        row.get(3)?,
    bio:             row.get(4)?,
    avatar_url:      row.get(5)?,
    cover_image_url: row.get(6)?,
    created_at:      parse_col(row, 7)?,
    updated_at:      parse_col(row, 8)?,
  })
}

pub const SKILL_COLS: &str = "id, talent_profile_id, name, proficiency";

pub fn skill_row(row: &Row<'_>) -> rusqlite::Result<Skill> {
  Ok(Skill {
    id:                SkillId(row.get(0)?),
    talent_profile_id: ProfileId(row.get(1)?),
    name:              row.get(2)?,
    proficiency:       row.get(3)?,
  })
}

pub const EXPERIENCE_COLS: &str = "id, talent_profile_id, title, company_name, \
  start_date, end_date, description";

pub fn experience_row(row: &Row<'_>) -> rusqlite::Result<Experience> {
  Ok(Experience {
    id:                ExperienceId(row.get(0)?),
    talent_profile_id: ProfileId(row.get(1)?),
    title:             row.get(2)?,
    company_name:      row.get(3)?,
    start_date:        parse_col(row, 4)?,
    end_date:          parse_opt_col(row, 5)?,
    description:       row.get(6)?,
  })
}

pub const PORTFOLIO_COLS: &str =
  "id, talent_profile_id, title, description, media_url, media_type";

pub fn portfolio_row(row: &Row<'_>) -> rusqlite::Result<PortfolioItem> {
  Ok(PortfolioItem {
    id:                PortfolioItemId(row.get(0)?),
    talent_profile_id: ProfileId(row.get(1)?),
    title:             row.get(2)?,
    description:       row.get(3)?,
    media_url:         row.get(4)?,
    media_type:        row.get(5)?,
  })
}

// ─── Casting ─────────────────────────────────────────────────────────────────

pub const CALL_COLS: &str = "id, posted_by_user_id, project_title, \
  project_type, description, is_active, created_at, updated_at";

pub fn call_row(row: &Row<'_>) -> rusqlite::Result<CastingCall> {
  Ok(CastingCall {
    id:                CastingCallId(row.get(0)?),
    posted_by_user_id: UserId(row.get(1)?),
    project_title:     row.get(2)?,
    project_type:      row.get(3)?,
    description:       row.get(4)?,
    is_active:         row.get(5)?,
    created_at:        parse_col(row, 6)?,
    updated_at:        parse_col(row, 7)?,
  })
}

pub const ROLE_COLS: &str =
  "id, casting_call_id, role_name, description, requirements";

pub fn role_row(row: &Row<'_>) -> rusqlite::Result<CastingRole> {
  Ok(CastingRole {
    id:              CastingRoleId(row.get(0)?),
    casting_call_id: CastingCallId(row.get(1)?),
    role_name:       row.get(2)?,
    description:     row.get(3)?,
    requirements:    row.get(4)?,
  })
}

pub const APPLICATION_COLS: &str = "id, talent_profile_id, casting_call_id, \
  status, cover_letter, created_at, updated_at";

pub fn application_row(row: &Row<'_>) -> rusqlite::Result<Application> {
  Ok(Application {
    id:                ApplicationId(row.get(0)?),
    talent_profile_id: ProfileId(row.get(1)?),
    casting_call_id:   CastingCallId(row.get(2)?),
    status:            parse_col(row, 3)?,
    cover_letter:      row.get(4)?,
    created_at:        parse_col(row, 5)?,
    updated_at:        parse_col(row, 6)?,
  })
}

// ─── Social ──────────────────────────────────────────────────────────────────

pub const PULSE_COLS: &str =
  "id, user_id, content, media_url, media_type, created_at";

pub fn pulse_row(row: &Row<'_>) -> rusqlite::Result<Pulse> {
  Ok(Pulse {
    id:         PulseId(row.get(0)?),
    user_id:    UserId(row.get(1)?),
    content:    row.get(2)?,
    media_url:  row.get(3)?,
    media_type: row.get(4)?,
    created_at: parse_col(row, 5)?,
  })
}

/// Comment columns followed by the author's summary; expects `comments c`
/// joined with `users u`.
pub const COMMENT_COLS: &str = "c.id, c.user_id, c.owner_kind, c.owner_id, \
  c.content, c.created_at, u.id, u.username, u.avatar_url";

/// A `comments` row before its owner reference is decoded.
pub struct RawComment {
  pub id:         i64,
  pub user_id:    i64,
  pub owner_kind: String,
  pub owner_id:   i64,
  pub content:    String,
  pub created_at: DateTime<Utc>,
  pub author:     UserSummary,
}

pub fn raw_comment_row(row: &Row<'_>) -> rusqlite::Result<RawComment> {
  Ok(RawComment {
    id:         row.get(0)?,
    user_id:    row.get(1)?,
    owner_kind: row.get(2)?,
    owner_id:   row.get(3)?,
    content:    row.get(4)?,
    created_at: parse_col(row, 5)?,
    author:     user_summary_at(row, 6)?,
  })
}

impl RawComment {
  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      id:         CommentId(self.id),
      user_id:    UserId(self.user_id),
      owner:      OwnerRef::from_parts(&self.owner_kind, self.owner_id)?,
      content:    self.content,
      created_at: self.created_at,
      author:     self.author,
    })
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

pub const MOVIE_COLS: &str = "id, title, poster_url, sidduscore, genre, \
  release_date, description, director";

pub fn movie_row(row: &Row<'_>) -> rusqlite::Result<Movie> {
  Ok(Movie {
    id:           MovieId(row.get(0)?),
    title:        row.get(1)?,
    poster_url:   row.get(2)?,
    sidduscore:   row.get(3)?,
    genre:        row.get(4)?,
    release_date: parse_opt_col(row, 5)?,
    description:  row.get(6)?,
    director:     row.get(7)?,
  })
}

pub const AWARD_COLS: &str = "id, name, year, logo_url";

pub fn award_row(row: &Row<'_>) -> rusqlite::Result<Award> {
  Ok(Award {
    id:       AwardId(row.get(0)?),
    name:     row.get(1)?,
    year:     row.get(2)?,
    logo_url: row.get(3)?,
  })
}

pub const MATCH_COLS: &str = "id, team1, team2, date, venue, status, score";

pub fn match_row(row: &Row<'_>) -> rusqlite::Result<CricketMatch> {
  Ok(CricketMatch {
    id:     CricketMatchId(row.get(0)?),
    team1:  row.get(1)?,
    team2:  row.get(2)?,
    date:   parse_opt_col(row, 3)?,
    venue:  row.get(4)?,
    status: parse_col(row, 5)?,
    score:  row.get(6)?,
  })
}
