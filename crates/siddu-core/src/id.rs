//! Strongly typed row identifiers.
//!
//! Every entity gets its own newtype so a profile id can never be passed where
//! a user id is expected, which is exactly the mix-up ownership checks exist
//! to catch. On the wire and in the database an id is a positive integer.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

macro_rules! id_type {
  ($($(#[$meta:meta])* $name:ident;)+) => {$(
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
      Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }

    impl FromStr for $name {
      type Err = Error;

      /// Accepts only positive decimal integers.
      fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
          Ok(v) if v > 0 => Ok(Self(v)),
          _ => Err(Error::MalformedId(s.to_owned())),
        }
      }
    }
  )+};
}

id_type! {
  UserId;
  ProfileId;
  SkillId;
  ExperienceId;
  PortfolioItemId;
  CastingCallId;
  CastingRoleId;
  ApplicationId;
  PulseId;
  LikeId;
  CommentId;
  MovieId;
  AwardId;
  CricketMatchId;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_positive_integers() {
    assert_eq!("42".parse::<ProfileId>().unwrap(), ProfileId(42));
  }

  #[test]
  fn rejects_malformed_input() {
    for raw in ["", "abc", "0", "-3", "1.5", " 7", "99999999999999999999"] {
      assert!(
        matches!(raw.parse::<UserId>(), Err(Error::MalformedId(_))),
        "{raw:?} should not parse"
      );
    }
  }

  #[test]
  fn serializes_as_bare_integer() {
    let json = serde_json::to_string(&CastingCallId(9)).unwrap();
    assert_eq!(json, "9");
  }
}
