//! Handlers for `/cricket/matches` endpoints. Writes need the admin role.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use siddu_core::{
  catalog::{CricketMatch, CricketMatchFields},
  id::CricketMatchId,
  store::VerseStore,
};

use crate::{
  AppState,
  access::{parse_id, require_admin},
  auth::AuthUser,
  error::{Error, JsonBody},
};

/// `GET /cricket/matches`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<CricketMatch>>, Error>
where
  S: VerseStore + 'static,
{
  Ok(Json(state.store.list_cricket_matches().await.map_err(Error::store)?))
}

/// `GET /cricket/matches/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<CricketMatch>, Error>
where
  S: VerseStore + 'static,
{
  let id: CricketMatchId = parse_id(&raw_id, "cricket match")?;
  let found = state
    .store
    .get_cricket_match(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("cricket match"))?;
  Ok(Json(found))
}

/// `POST /cricket/matches`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  JsonBody(fields): JsonBody<CricketMatchFields>,
) -> Result<impl IntoResponse, Error>
where
  S: VerseStore + 'static,
{
  require_admin(&*state.store, caller.id).await?;
  fields.validate()?;
  let created = state
    .store
    .create_cricket_match(fields)
    .await
    .map_err(Error::store)?;
  Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /cricket/matches/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
  JsonBody(fields): JsonBody<CricketMatchFields>,
) -> Result<Json<CricketMatch>, Error>
where
  S: VerseStore + 'static,
{
  require_admin(&*state.store, caller.id).await?;
  let id: CricketMatchId = parse_id(&raw_id, "cricket match")?;
  fields.validate()?;
  let updated = state
    .store
    .update_cricket_match(id, fields)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("cricket match"))?;
  Ok(Json(updated))
}
