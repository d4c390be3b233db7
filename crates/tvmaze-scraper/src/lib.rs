//! Ingestion pipeline for the TVmaze show catalog.
//!
//! [`IngestLoop`] walks the upstream catalog page by page, resuming from the
//! highest show already stored. Each page goes through [`Pipeline`]: list the
//! shows, fetch every show's cast concurrently behind a shared
//! [`RateLimiter`] and a bounded [`RetryPolicy`], then merge the batch into a
//! [`ShowStore`](tvmaze_core::store::ShowStore).

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod rate_limit;
pub mod retry;

pub use catalog::{Catalog, CatalogError};
pub use client::HttpCatalog;
pub use config::ScraperConfig;
pub use error::{Cancelled, Error, Result};
pub use ingest::{ExhaustedPolicy, IngestLoop, LoopExit};
pub use pipeline::{PageOutcome, Pipeline};
pub use rate_limit::RateLimiter;
pub use retry::{RetryError, RetryPolicy};
