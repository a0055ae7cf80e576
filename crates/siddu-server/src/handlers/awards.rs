//! Handlers for `/awards` endpoints. Writes need the admin role.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use siddu_core::{
  catalog::{Award, AwardFields},
  id::AwardId,
  store::VerseStore,
};

use crate::{
  AppState,
  access::{parse_id, require_admin},
  auth::AuthUser,
  error::{Error, JsonBody},
  handlers::deleted,
};

/// `GET /awards`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<Award>>, Error>
where
  S: VerseStore + 'static,
{
  Ok(Json(state.store.list_awards().await.map_err(Error::store)?))
}

/// `GET /awards/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Award>, Error>
where
  S: VerseStore + 'static,
{
  let id: AwardId = parse_id(&raw_id, "award")?;
  let award = state
    .store
    .get_award(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("award"))?;
  Ok(Json(award))
}

/// `POST /awards`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  JsonBody(fields): JsonBody<AwardFields>,
) -> Result<impl IntoResponse, Error>
where
  S: VerseStore + 'static,
{
  require_admin(&*state.store, caller.id).await?;
  fields.validate()?;
  let award = state.store.create_award(fields).await.map_err(Error::store)?;
  Ok((StatusCode::CREATED, Json(award)))
}

/// `PUT /awards/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
  JsonBody(fields): JsonBody<AwardFields>,
) -> Result<Json<Award>, Error>
where
  S: VerseStore + 'static,
{
  require_admin(&*state.store, caller.id).await?;
  let id: AwardId = parse_id(&raw_id, "award")?;
  fields.validate()?;
  let award = state
    .store
    .update_award(id, fields)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("award"))?;
  Ok(Json(award))
}

/// `DELETE /awards/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
) -> Result<Response, Error>
where
  S: VerseStore + 'static,
{
  require_admin(&*state.store, caller.id).await?;
  let id: AwardId = parse_id(&raw_id, "award")?;
  if !state.store.delete_award(id).await.map_err(Error::store)? {
    return Err(Error::not_found("award"));
  }
  tracing::info!(user = %caller.id, award = %id, "deleted award");
  Ok(deleted("award"))
}
