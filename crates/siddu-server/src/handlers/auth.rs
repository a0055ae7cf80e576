//! Handlers for `/auth` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/register` | Body: [`RegisterBody`]; 201 + user, 409 on a taken username or email |
//! | `POST` | `/auth/login` | Body: [`LoginBody`]; `{"token": ...}` |
//! | `GET`  | `/auth/me` | The caller's own account |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use siddu_core::{
  store::{Inserted, VerseStore},
  user::{self, NewUser, Role, User},
};

use crate::{
  AppState,
  auth::{self as password, AuthUser},
  error::{Error, JsonBody},
};

async fn blocking<T, F>(f: F) -> Result<T, Error>
where
  T: Send + 'static,
  F: FnOnce() -> T + Send + 'static,
{
  tokio::task::spawn_blocking(f)
    .await
    .map_err(|e| Error::Internal(format!("blocking task failed: {e}")))
}

// ─── Register ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
  pub username: String,
  pub email:    String,
  pub password: String,
}

/// `POST /auth/register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<RegisterBody>,
) -> Result<impl IntoResponse, Error>
where
  S: VerseStore + 'static,
{
  user::validate_registration(&body.username, &body.email, &body.password)?;

  let password = body.password;
  let password_hash = blocking(move || password::hash_password(&password)).await??;

  let input = NewUser {
    username: body.username.trim().to_owned(),
    email: user::normalize_email(&body.email),
    password_hash,
    role: Role::User,
  };

  match state.store.create_user(input).await.map_err(Error::store)? {
    Inserted::New(account) => {
      tracing::info!(user = %account.id, username = %account.username, "registered user");
      Ok((StatusCode::CREATED, Json(account)))
    }
    Inserted::Duplicate => Err(Error::Conflict("username or email is already registered".into())),
  }
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

/// `POST /auth/login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  JsonBody(body): JsonBody<LoginBody>,
) -> Result<impl IntoResponse, Error>
where
  S: VerseStore + 'static,
{
  let invalid = || Error::Unauthenticated("invalid email or password".into());

  let password = body.password;
  let Some(account) = state
    .store
    .get_user_by_email(user::normalize_email(&body.email))
    .await
    .map_err(Error::store)?
  else {
    blocking(move || password::verify_unknown_account(&password)).await?;
    return Err(invalid());
  };

  let phc = account.password_hash.clone();
  if !blocking(move || password::verify_password(&password, &phc)).await? {
    tracing::info!(user = %account.id, "failed login");
    return Err(invalid());
  }

  let token = state
    .tokens
    .issue(account.id)
    .map_err(|e| Error::Internal(e.to_string()))?;
  tracing::info!(user = %account.id, "issued session token");
  Ok(Json(json!({ "token": token })))
}

// ─── Me ──────────────────────────────────────────────────────────────────────

/// `GET /auth/me`
pub async fn me<S>(
  State(state): State<AppState<S>>,
  caller: AuthUser,
) -> Result<Json<User>, Error>
where
  S: VerseStore + 'static,
{
  let account = state
    .store
    .get_user(caller.id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::not_found("user"))?;
  Ok(Json(account))
}
