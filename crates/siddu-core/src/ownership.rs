//! Ownership resolution: does a given user have authority over a resource?
//!
//! Raw identifiers arrive straight from request paths, so every resolver
//! accepts a `&str` and treats an unparseable id exactly like a missing row.
//!
//! Two layers are exposed:
//!
//! - `resolve_*` functions return a [`Resolution`], keeping "does not exist"
//!   apart from "exists but belongs to someone else" so the HTTP layer can
//!   answer 404 and 403 respectively.
//! - `is_*_owner` predicates collapse that into a fail-closed `bool` that is
//!   total over all inputs: a missing row, a malformed id, or a store failure
//!   all deny.

use crate::{
  casting::{Application, CastingCall},
  id::{ApplicationId, CastingCallId, ProfileId, UserId},
  store::VerseStore,
  talent::TalentProfile,
};

/// The verdict of an ownership check against a stored resource.
#[derive(Debug, Clone)]
pub enum Resolution<T> {
  /// The resource exists and the caller has authority over it.
  Granted(T),
  /// The resource exists but the caller has no authority over it.
  Denied,
  /// The id is malformed or no such resource exists.
  NotFound,
}

impl<T> Resolution<T> {
  pub fn is_granted(&self) -> bool { matches!(self, Self::Granted(_)) }
}

// ─── Talent profiles ─────────────────────────────────────────────────────────

/// Granted iff the profile exists and `profile.user_id == user`.
pub async fn resolve_profile<S: VerseStore>(
  store: &S,
  user: UserId,
  raw_id: &str,
) -> Result<Resolution<TalentProfile>, S::Error> {
  let Ok(id) = raw_id.parse::<ProfileId>() else {
    return Ok(Resolution::NotFound);
  };
  Ok(match store.get_profile(id).await? {
    None => Resolution::NotFound,
    Some(profile) if profile.user_id == user => Resolution::Granted(profile),
    Some(_) => Resolution::Denied,
  })
}

pub async fn is_profile_owner<S: VerseStore>(
  store: &S,
  user: UserId,
  raw_id: &str,
) -> bool {
  matches!(resolve_profile(store, user, raw_id).await, Ok(r) if r.is_granted())
}

// ─── Casting calls ───────────────────────────────────────────────────────────

/// Granted iff the call exists and `call.posted_by_user_id == user`.
pub async fn resolve_casting_call<S: VerseStore>(
  store: &S,
  user: UserId,
  raw_id: &str,
) -> Result<Resolution<CastingCall>, S::Error> {
  let Ok(id) = raw_id.parse::<CastingCallId>() else {
    return Ok(Resolution::NotFound);
  };
  Ok(match store.get_casting_call(id).await? {
    None => Resolution::NotFound,
    Some(call) if call.posted_by_user_id == user => Resolution::Granted(call),
    Some(_) => Resolution::Denied,
  })
}

pub async fn is_casting_call_owner<S: VerseStore>(
  store: &S,
  user: UserId,
  raw_id: &str,
) -> bool {
  matches!(resolve_casting_call(store, user, raw_id).await, Ok(r) if r.is_granted())
}

// ─── Applications ────────────────────────────────────────────────────────────

async fn load_application<S: VerseStore>(
  store: &S,
  raw_id: &str,
) -> Result<Option<Application>, S::Error> {
  match raw_id.parse::<ApplicationId>() {
    Ok(id) => store.get_application(id).await,
    Err(_) => Ok(None),
  }
}

/// An application is visible to its applicant (the user owning the applying
/// profile) and to its recruiter (the user who posted the casting call).
pub async fn resolve_application_viewer<S: VerseStore>(
  store: &S,
  user: UserId,
  raw_id: &str,
) -> Result<Resolution<Application>, S::Error> {
  let Some(application) = load_application(store, raw_id).await? else {
    return Ok(Resolution::NotFound);
  };

  let is_applicant = store
    .get_profile(application.talent_profile_id)
    .await?
    .is_some_and(|profile| profile.user_id == user);

  let call_id = application.casting_call_id.to_string();
  let is_recruiter = is_casting_call_owner(store, user, &call_id).await;

  Ok(if is_applicant || is_recruiter {
    Resolution::Granted(application)
  } else {
    Resolution::Denied
  })
}

/// Only the recruiter may act on an application (e.g. change its status).
pub async fn resolve_application_recruiter<S: VerseStore>(
  store: &S,
  user: UserId,
  raw_id: &str,
) -> Result<Resolution<Application>, S::Error> {
  let Some(application) = load_application(store, raw_id).await? else {
    return Ok(Resolution::NotFound);
  };

  let call_id = application.casting_call_id.to_string();
  Ok(if is_casting_call_owner(store, user, &call_id).await {
    Resolution::Granted(application)
  } else {
    Resolution::Denied
  })
}
