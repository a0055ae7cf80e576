//! Pulses (feed posts) and the likes and comments attached to them.
//!
//! Likes and comments are polymorphic: they point at an [`OwnerRef`], which
//! today is either a pulse or a movie.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  error::require,
  id::{CommentId, LikeId, MovieId, PulseId, UserId},
  user::UserSummary,
};

// ─── Owner reference ─────────────────────────────────────────────────────────

/// The resource a like or comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum OwnerRef {
  Pulse(PulseId),
  Movie(MovieId),
}

impl OwnerRef {
  /// The discriminant stored in the `owner_kind` column.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Pulse(_) => "pulse",
      Self::Movie(_) => "movie",
    }
  }

  /// The raw id stored in the `owner_id` column.
  pub fn raw_id(&self) -> i64 {
    match self {
      Self::Pulse(id) => id.0,
      Self::Movie(id) => id.0,
    }
  }

  /// Rebuild from the `(owner_kind, owner_id)` column pair.
  pub fn from_parts(kind: &str, id: i64) -> Result<Self> {
    match kind {
      "pulse" => Ok(Self::Pulse(PulseId(id))),
      "movie" => Ok(Self::Movie(MovieId(id))),
      other => Err(Error::UnknownOwnerKind(other.to_owned())),
    }
  }
}

// ─── Pulses ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pulse {
  pub id:         PulseId,
  pub user_id:    UserId,
  pub content:    String,
  pub media_url:  Option<String>,
  /// "image" or "video".
  pub media_type: Option<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPulse {
  pub content:    String,
  pub media_url:  Option<String>,
  pub media_type: Option<String>,
}

impl NewPulse {
  pub fn validate(&self) -> Result<()> { require("content", &self.content) }
}

/// A pulse as shown in the feed: with its author and reaction counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPulse {
  #[serde(flatten)]
  pub pulse:         Pulse,
  pub author:        UserSummary,
  pub like_count:    i64,
  pub comment_count: i64,
}

// ─── Likes ───────────────────────────────────────────────────────────────────

/// A like is unique per (user, owner).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
  pub id:         LikeId,
  pub user_id:    UserId,
  pub owner:      OwnerRef,
  pub created_at: DateTime<Utc>,
}

/// Result of [`crate::store::VerseStore::toggle_like`].
#[derive(Debug, Clone)]
pub enum LikeToggle {
  /// No like existed; one was created.
  Liked(Like),
  /// A like existed and was removed.
  Unliked,
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
  pub id:         CommentId,
  pub user_id:    UserId,
  pub owner:      OwnerRef,
  pub content:    String,
  pub created_at: DateTime<Utc>,
  pub author:     UserSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
  pub content: String,
}

impl NewComment {
  pub fn validate(&self) -> Result<()> { require("content", &self.content) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn owner_ref_column_encoding() {
    let owner = OwnerRef::Movie(MovieId(4));
    assert_eq!(owner.kind(), "movie");
    assert_eq!(OwnerRef::from_parts(owner.kind(), owner.raw_id()).unwrap(), owner);
    assert!(matches!(
      OwnerRef::from_parts("pulses", 4),
      Err(Error::UnknownOwnerKind(_))
    ));
  }

  #[test]
  fn owner_ref_json_shape() {
    let json = serde_json::to_value(OwnerRef::Pulse(PulseId(3))).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "pulse", "id": 3 }));
  }
}
