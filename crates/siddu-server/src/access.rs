//! Resource access gates.
//!
//! Each gate turns an ownership [`Resolution`] into the handler's error
//! contract: a target that does not resolve is a 404, one that resolves to
//! somebody else is a 403, and a store failure is a 500. Authentication (401)
//! has already happened in the [`AuthUser`](crate::auth::AuthUser) extractor.

use std::str::FromStr;

use siddu_core::{
  casting::{Application, CastingCall},
  id::UserId,
  ownership::{self, Resolution},
  store::VerseStore,
  talent::TalentProfile,
  user::{Role, User},
};

use crate::error::Error;

fn gate<T>(
  resolution: Resolution<T>,
  what: &'static str,
  user: UserId,
  raw_id: &str,
) -> Result<T, Error> {
  match resolution {
    Resolution::Granted(target) => Ok(target),
    Resolution::NotFound => Err(Error::not_found(what)),
    Resolution::Denied => {
      tracing::warn!(%user, resource = what, id = raw_id, "ownership check denied");
      Err(Error::Forbidden(format!("you do not have access to this {what}")))
    }
  }
}

/// The profile at `raw_id`, if `user` owns it.
pub async fn profile_for_owner<S: VerseStore>(
  store: &S,
  user: UserId,
  raw_id: &str,
) -> Result<TalentProfile, Error> {
  let resolution = ownership::resolve_profile(store, user, raw_id)
    .await
    .map_err(Error::store)?;
  gate(resolution, "talent profile", user, raw_id)
}

/// The casting call at `raw_id`, if `user` posted it.
pub async fn casting_call_for_owner<S: VerseStore>(
  store: &S,
  user: UserId,
  raw_id: &str,
) -> Result<CastingCall, Error> {
  let resolution = ownership::resolve_casting_call(store, user, raw_id)
    .await
    .map_err(Error::store)?;
  gate(resolution, "casting call", user, raw_id)
}

/// The application at `raw_id`, if `user` is its applicant or recruiter.
pub async fn application_for_viewer<S: VerseStore>(
  store: &S,
  user: UserId,
  raw_id: &str,
) -> Result<Application, Error> {
  let resolution = ownership::resolve_application_viewer(store, user, raw_id)
    .await
    .map_err(Error::store)?;
  gate(resolution, "application", user, raw_id)
}

/// The application at `raw_id`, if `user` posted the casting call it targets.
pub async fn application_for_recruiter<S: VerseStore>(
  store: &S,
  user: UserId,
  raw_id: &str,
) -> Result<Application, Error> {
  let resolution = ownership::resolve_application_recruiter(store, user, raw_id)
    .await
    .map_err(Error::store)?;
  gate(resolution, "application", user, raw_id)
}

/// Catalog writes are reserved for users whose stored role is `admin`.
pub async fn require_admin<S: VerseStore>(store: &S, user: UserId) -> Result<User, Error> {
  match store.get_user(user).await.map_err(Error::store)? {
    Some(account) if account.role == Role::Admin => Ok(account),
    Some(_) => {
      tracing::warn!(%user, "catalog write refused for non-admin");
      Err(Error::Forbidden("admin role required".into()))
    }
    None => Err(Error::Unauthenticated("unknown user".into())),
  }
}

/// Parse a path segment for a public lookup. Malformed ids are 404s.
pub fn parse_id<I: FromStr>(raw: &str, what: &str) -> Result<I, Error> {
  raw.parse().map_err(|_| Error::not_found(what))
}
