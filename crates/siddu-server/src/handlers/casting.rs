//! Handlers for `/talent/casting-calls` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/talent/casting-calls` | Newest first |
//! | `POST` | `/talent/casting-calls` | Body: [`NewCastingCall`]; roles are created with the call |
//! | `GET`  | `/talent/casting-calls/{id}` | Call with poster and roles |
//! | `PUT`  | `/talent/casting-calls/{id}` | Poster only; partial update |
//! | `POST` | `/talent/casting-calls/{id}/apply` | Caller must hold a talent profile |
//! | `GET`  | `/talent/casting-calls/{id}/applications` | Poster only |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use siddu_core::{
  casting::{
    Application, CastingCall, CastingCallDetail, CastingCallUpdate,
    NewApplication, NewCastingCall,
  },
  id::CastingCallId,
  store::{Inserted, VerseStore},
};

use crate::{
  AppState,
  access::{casting_call_for_owner, parse_id},
  auth::AuthUser,
  error::{Error, JsonBody},
};

/// `GET /talent/casting-calls`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<CastingCall>>, Error>
where
  S: VerseStore + 'static,
{
  let calls = state.store.list_casting_calls().await.map_err(Error::store)?;
  Ok(Json(calls))
}

/// `POST /talent/casting-calls`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  JsonBody(input): JsonBody<NewCastingCall>,
) -> Result<impl IntoResponse, Error>
where
  S: VerseStore + 'static,
{
  input.validate()?;
  let detail = state
    .store
    .create_casting_call(caller.id, input)
    .await
    .map_err(Error::store)?;
  tracing::info!(
    user = %caller.id,
    call = %detail.call.id,
    roles = detail.roles.len(),
    "posted casting call"
  );
  Ok((StatusCode::CREATED, Json(detail)))
}

/// `GET /talent/casting-calls/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<CastingCallDetail>, Error>
where
  S: VerseStore + 'static,
{
  let id: CastingCallId = parse_id(&raw_id, "casting call")?;
  let detail = state
    .store
    .get_casting_call_detail(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("casting call"))?;
  Ok(Json(detail))
}

/// `PUT /talent/casting-calls/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
  JsonBody(update): JsonBody<CastingCallUpdate>,
) -> Result<Json<CastingCall>, Error>
where
  S: VerseStore + 'static,
{
  let call = casting_call_for_owner(&*state.store, caller.id, &raw_id).await?;
  update.validate()?;
  let updated = state
    .store
    .update_casting_call(call.id, update)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("casting call"))?;
  Ok(Json(updated))
}

// ─── Apply ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyBody {
  pub cover_letter: Option<String>,
}

/// `POST /talent/casting-calls/{id}/apply`
///
/// 404 for an unknown call, 403 when the caller has no talent profile, 400
/// when the call is closed, 409 on a repeat application.
pub async fn apply<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
  JsonBody(body): JsonBody<ApplyBody>,
) -> Result<impl IntoResponse, Error>
where
  S: VerseStore + 'static,
{
  let call_id: CastingCallId = parse_id(&raw_id, "casting call")?;
  let call = state
    .store
    .get_casting_call(call_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("casting call"))?;

  let profile = state
    .store
    .get_profile_by_user(caller.id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| {
      Error::Forbidden("User must have a talent profile to apply.".into())
    })?;

  if !call.is_active {
    return Err(Error::Validation(
      "casting call is no longer accepting applications".into(),
    ));
  }

  let input = NewApplication {
    talent_profile_id: profile.id,
    casting_call_id:   call.id,
    cover_letter:      body.cover_letter,
  };
  match state
    .store
    .create_application(input)
    .await
    .map_err(Error::store)?
  {
    Inserted::New(application) => {
      tracing::info!(
        profile = %profile.id,
        call = %call.id,
        application = %application.id,
        "submitted application"
      );
      Ok((StatusCode::CREATED, Json(application)))
    }
    Inserted::Duplicate => Err(Error::Conflict(
      "already applied to this casting call".into(),
    )),
  }
}

/// `GET /talent/casting-calls/{id}/applications`
pub async fn applications<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
) -> Result<Json<Vec<Application>>, Error>
where
  S: VerseStore + 'static,
{
  let call = casting_call_for_owner(&*state.store, caller.id, &raw_id).await?;
  let applications = state
    .store
    .list_applications_for_call(call.id)
    .await
    .map_err(Error::store)?;
  Ok(Json(applications))
}
