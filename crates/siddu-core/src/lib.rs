//! Core types and trait definitions for the Siddu Verse backend.
//!
//! This crate has no HTTP or database dependencies. The
//! store backend and the HTTP server both depend on it.

// Store implementations use native `async fn` for the trait's methods.
#![allow(async_fn_in_trait)]

pub mod casting;
pub mod catalog;
pub mod error;
pub mod id;
pub mod ownership;
pub mod social;
pub mod store;
pub mod talent;
pub mod user;

pub use error::{Error, Result};
