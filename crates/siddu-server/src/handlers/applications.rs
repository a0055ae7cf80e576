//! Handlers for `/talent/applications/{app_id}`.
//!
//! Reading is open to the applicant and the recruiter; changing the status is
//! the recruiter's alone.

use axum::{
  Json,
  extract::{Path, State},
};
use serde::Deserialize;
use siddu_core::{
  casting::{Application, ApplicationStatus},
  store::VerseStore,
};

use crate::{
  AppState,
  access::{application_for_recruiter, application_for_viewer},
  auth::AuthUser,
  error::{Error, JsonBody},
};

/// `GET /talent/applications/{app_id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
) -> Result<Json<Application>, Error>
where
  S: VerseStore + 'static,
{
  let application = application_for_viewer(&*state.store, caller.id, &raw_id).await?;
  Ok(Json(application))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: ApplicationStatus,
}

/// `PUT /talent/applications/{app_id}`
pub async fn update_status<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
  JsonBody(body): JsonBody<StatusBody>,
) -> Result<Json<Application>, Error>
where
  S: VerseStore + 'static,
{
  let application = application_for_recruiter(&*state.store, caller.id, &raw_id).await?;
  let updated = state
    .store
    .update_application_status(application.id, body.status)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("application"))?;
  tracing::info!(
    application = %updated.id,
    status = updated.status.as_ref(),
    "application status changed"
  );
  Ok(Json(updated))
}
