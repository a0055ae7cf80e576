//! Handlers for `/pulses` endpoints: the feed, posting, likes and comments.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use siddu_core::{
  id::PulseId,
  social::{FeedPulse, NewComment, NewPulse, OwnerRef},
  store::VerseStore,
};

use crate::{
  AppState,
  access::parse_id,
  auth::AuthUser,
  error::{Error, JsonBody},
  handlers,
};

/// Resolve the pulse at `raw_id` into a reaction target, or 404.
async fn target<S: VerseStore>(store: &S, raw_id: &str) -> Result<OwnerRef, Error> {
  let id: PulseId = parse_id(raw_id, "pulse")?;
  store
    .get_pulse(id)
    .await
    .map_err(Error::store)?
    .map(|pulse| OwnerRef::Pulse(pulse.id))
    .ok_or_else(|| Error::not_found("pulse"))
}

/// `GET /pulses`
pub async fn feed<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<FeedPulse>>, Error>
where
  S: VerseStore + 'static,
{
  let feed = state.store.list_feed().await.map_err(Error::store)?;
  Ok(Json(feed))
}

/// `POST /pulses`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  JsonBody(input): JsonBody<NewPulse>,
) -> Result<impl IntoResponse, Error>
where
  S: VerseStore + 'static,
{
  input.validate()?;
  let pulse = state
    .store
    .create_pulse(caller.id, input)
    .await
    .map_err(Error::store)?;
  tracing::info!(user = %caller.id, pulse = %pulse.id, "posted pulse");
  Ok((StatusCode::CREATED, Json(pulse)))
}

/// `POST /pulses/{id}/like`
pub async fn like<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
) -> Result<Response, Error>
where
  S: VerseStore + 'static,
{
  let owner = target(&*state.store, &raw_id).await?;
  handlers::toggle_like(&*state.store, caller.id, owner).await
}

/// `GET /pulses/{id}/comments`
pub async fn comments<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Response, Error>
where
  S: VerseStore + 'static,
{
  let owner = target(&*state.store, &raw_id).await?;
  handlers::list_comments(&*state.store, owner).await
}

/// `POST /pulses/{id}/comments`
pub async fn add_comment<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
  JsonBody(body): JsonBody<NewComment>,
) -> Result<Response, Error>
where
  S: VerseStore + 'static,
{
  let owner = target(&*state.store, &raw_id).await?;
  handlers::add_comment(&*state.store, caller.id, owner, body).await
}
