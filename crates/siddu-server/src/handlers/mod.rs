//! HTTP handlers, one module per resource family, plus the like and comment
//! plumbing shared by pulses and movies.

pub mod applications;
pub mod auth;
pub mod awards;
pub mod casting;
pub mod cricket;
pub mod movies;
pub mod profiles;
pub mod pulses;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use siddu_core::{
  id::UserId,
  social::{LikeToggle, NewComment, OwnerRef},
  store::VerseStore,
};

use crate::error::Error;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
  pub liked:      bool,
  pub like_count: i64,
}

/// Toggle the caller's like on `owner`: 201 when a like was created, 200 when
/// one was removed. The target must already have been checked to exist.
pub(crate) async fn toggle_like<S: VerseStore>(
  store: &S,
  user: UserId,
  owner: OwnerRef,
) -> Result<Response, Error> {
  let outcome = store.toggle_like(user, owner).await.map_err(Error::store)?;
  let like_count = store.count_likes(owner).await.map_err(Error::store)?;

  let (status, liked) = match outcome {
    LikeToggle::Liked(_) => (StatusCode::CREATED, true),
    LikeToggle::Unliked => (StatusCode::OK, false),
  };
  tracing::debug!(%user, kind = owner.kind(), id = owner.raw_id(), liked, "toggled like");
  Ok((status, Json(LikeStatus { liked, like_count })).into_response())
}

pub(crate) async fn add_comment<S: VerseStore>(
  store: &S,
  user: UserId,
  owner: OwnerRef,
  body: NewComment,
) -> Result<Response, Error> {
  body.validate()?;
  let comment = store
    .add_comment(user, owner, body.content)
    .await
    .map_err(Error::store)?;
  Ok((StatusCode::CREATED, Json(comment)).into_response())
}

pub(crate) async fn list_comments<S: VerseStore>(
  store: &S,
  owner: OwnerRef,
) -> Result<Response, Error> {
  let comments = store.list_comments(owner).await.map_err(Error::store)?;
  Ok(Json(comments).into_response())
}

pub(crate) fn deleted(what: &str) -> Response {
  Json(json!({ "message": format!("{what} deleted") })).into_response()
}
