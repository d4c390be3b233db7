//! JSON REST API over the stored TVmaze catalog.
//!
//! Exposes an axum [`Router`] backed by any [`tvmaze_core::store::ShowStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = tvmaze_api::api_router(store.clone());
//! ```

pub mod error;
pub mod shows;

use std::sync::Arc;

use axum::{Router, routing::get};
use tvmaze_core::store::ShowStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ShowStore + 'static,
{
  Router::new()
    .route("/tvshowsmaze", get(shows::list::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests;
