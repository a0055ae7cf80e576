//! JSON REST API for Siddu Verse.
//!
//! Exposes an axum [`Router`] backed by any [`VerseStore`]. Requests carry a
//! bearer session token issued by `/api/auth/login`; protected routes resolve
//! their target through [`access`] before acting on it.

pub mod access;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod token;

pub use config::ServerConfig;
pub use error::Error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use siddu_core::store::VerseStore;
use tower_http::trace::TraceLayer;

use handlers::{applications, awards, casting, cricket, movies, profiles, pulses};
use token::TokenService;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub tokens: Arc<TokenService>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      tokens: Arc::clone(&self.tokens),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full application router, with every endpoint under `/api`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: VerseStore + 'static,
{
  let api = Router::new()
    // Accounts
    .route("/auth/register", post(handlers::auth::register::<S>))
    .route("/auth/login", post(handlers::auth::login::<S>))
    .route("/auth/me", get(handlers::auth::me::<S>))
    // Talent profiles
    .route("/talent/profiles", get(profiles::list::<S>).post(profiles::create::<S>))
    .route(
      "/talent/profiles/{id}",
      get(profiles::get_one::<S>).put(profiles::update::<S>),
    )
    .route("/talent/profiles/{id}/skills", post(profiles::add_skill::<S>))
    .route(
      "/talent/profiles/{id}/skills/{skill_id}",
      delete(profiles::remove_skill::<S>),
    )
    .route("/talent/profiles/{id}/experiences", post(profiles::add_experience::<S>))
    .route(
      "/talent/profiles/{id}/experiences/{exp_id}",
      put(profiles::update_experience::<S>).delete(profiles::remove_experience::<S>),
    )
    .route("/talent/profiles/{id}/portfolio", post(profiles::add_portfolio_item::<S>))
    .route(
      "/talent/profiles/{id}/portfolio/{item_id}",
      delete(profiles::remove_portfolio_item::<S>),
    )
    .route("/talent/profiles/{id}/applications", get(profiles::applications::<S>))
    // Casting calls and applications
    .route(
      "/talent/casting-calls",
      get(casting::list::<S>).post(casting::create::<S>),
    )
    .route(
      "/talent/casting-calls/{id}",
      get(casting::get_one::<S>).put(casting::update::<S>),
    )
    .route("/talent/casting-calls/{id}/apply", post(casting::apply::<S>))
    .route(
      "/talent/casting-calls/{id}/applications",
      get(casting::applications::<S>),
    )
    .route(
      "/talent/applications/{app_id}",
      get(applications::get_one::<S>).put(applications::update_status::<S>),
    )
    // Pulses
    .route("/pulses", get(pulses::feed::<S>).post(pulses::create::<S>))
    .route("/pulses/{id}/like", post(pulses::like::<S>))
    .route(
      "/pulses/{id}/comments",
      get(pulses::comments::<S>).post(pulses::add_comment::<S>),
    )
    // Movies
    .route("/movies", get(movies::list::<S>).post(movies::create::<S>))
    .route("/movies/{id}", get(movies::get_one::<S>).put(movies::update::<S>))
    .route("/movies/{id}/like", post(movies::like::<S>))
    .route(
      "/movies/{id}/comments",
      get(movies::comments::<S>).post(movies::add_comment::<S>),
    )
    // Awards
    .route("/awards", get(awards::list::<S>).post(awards::create::<S>))
    .route(
      "/awards/{id}",
      get(awards::get_one::<S>)
        .put(awards::update::<S>)
        .delete(awards::delete::<S>),
    )
    // Cricket
    .route(
      "/cricket/matches",
      get(cricket::list::<S>).post(cricket::create::<S>),
    )
    .route(
      "/cricket/matches/{id}",
      get(cricket::get_one::<S>).put(cricket::update::<S>),
    );

  Router::new()
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests;
