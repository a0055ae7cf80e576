//! Handlers for `/movies` endpoints.
//!
//! Reads are public, writes need the admin role, and any signed-in user may
//! like or comment.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use siddu_core::{
  catalog::{Movie, MovieFields},
  id::MovieId,
  social::{NewComment, OwnerRef},
  store::VerseStore,
};

use crate::{
  AppState,
  access::{parse_id, require_admin},
  auth::AuthUser,
  error::{Error, JsonBody},
  handlers,
};

async fn load<S: VerseStore>(store: &S, raw_id: &str) -> Result<Movie, Error> {
  let id: MovieId = parse_id(raw_id, "movie")?;
  store
    .get_movie(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("movie"))
}

/// `GET /movies`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<Movie>>, Error>
where
  S: VerseStore + 'static,
{
  Ok(Json(state.store.list_movies().await.map_err(Error::store)?))
}

/// `GET /movies/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Movie>, Error>
where
  S: VerseStore + 'static,
{
  Ok(Json(load(&*state.store, &raw_id).await?))
}

/// `POST /movies`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  JsonBody(fields): JsonBody<MovieFields>,
) -> Result<impl IntoResponse, Error>
where
  S: VerseStore + 'static,
{
  require_admin(&*state.store, caller.id).await?;
  fields.validate()?;
  let movie = state.store.create_movie(fields).await.map_err(Error::store)?;
  tracing::info!(user = %caller.id, movie = %movie.id, "added movie");
  Ok((StatusCode::CREATED, Json(movie)))
}

/// `PUT /movies/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
  JsonBody(fields): JsonBody<MovieFields>,
) -> Result<Json<Movie>, Error>
where
  S: VerseStore + 'static,
{
  require_admin(&*state.store, caller.id).await?;
  let id: MovieId = parse_id(&raw_id, "movie")?;
  fields.validate()?;
  let movie = state
    .store
    .update_movie(id, fields)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("movie"))?;
  Ok(Json(movie))
}

/// `POST /movies/{id}/like`
pub async fn like<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
) -> Result<Response, Error>
where
  S: VerseStore + 'static,
{
  let movie = load(&*state.store, &raw_id).await?;
  handlers::toggle_like(&*state.store, caller.id, OwnerRef::Movie(movie.id)).await
}

/// `GET /movies/{id}/comments`
pub async fn comments<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Response, Error>
where
  S: VerseStore + 'static,
{
  let movie = load(&*state.store, &raw_id).await?;
  handlers::list_comments(&*state.store, OwnerRef::Movie(movie.id)).await
}

/// `POST /movies/{id}/comments`
pub async fn add_comment<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
  Path(raw_id): Path<String>,
  JsonBody(body): JsonBody<NewComment>,
) -> Result<Response, Error>
where
  S: VerseStore + 'static,
{
  let movie = load(&*state.store, &raw_id).await?;
  handlers::add_comment(&*state.store, caller.id, OwnerRef::Movie(movie.id), body).await
}
