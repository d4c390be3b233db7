//! Core types and trait definitions for the TVmaze show catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The scraper, the store backends, and the read API all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod page;
pub mod show;
pub mod store;

pub use error::{Error, Result};
