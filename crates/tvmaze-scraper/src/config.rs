//! Scraper configuration, deserialised from a TOML file and `TVMAZE_*`
//! environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use serde::Deserialize;

use crate::{ingest::ExhaustedPolicy, rate_limit::RateLimiter, retry::RetryPolicy};

/// Behaviour once the upstream returns an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustedMode {
  Stop,
  Poll,
}

/// Runtime configuration for the `tvmaze-scraper` binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
  pub base_url:             String,
  pub store_path:           PathBuf,
  /// Fixed page size of the upstream `/shows` listing.
  pub shows_per_page:       u32,
  pub request_timeout_secs: u64,
  pub max_retries:          u32,
  pub retry_base_delay_ms:  u64,
  /// Cast requests admitted per `rate_limit_window_ms`.
  pub rate_limit_permits:   u32,
  pub rate_limit_window_ms: u64,
  pub on_exhausted:         ExhaustedMode,
  pub poll_interval_secs:   u64,
}

impl Default for ScraperConfig {
  fn default() -> Self {
    Self {
      base_url:             "https://api.tvmaze.com".into(),
      store_path:           PathBuf::from("tvmaze.db"),
      shows_per_page:       250,
      request_timeout_secs: 30,
      max_retries:          3,
      retry_base_delay_ms:  1000,
      rate_limit_permits:   10,
      rate_limit_window_ms: 1000,
      on_exhausted:         ExhaustedMode::Poll,
      poll_interval_secs:   3600,
    }
  }
}

impl ScraperConfig {
  /// Layer the optional TOML file at `path` under `TVMAZE_*` environment
  /// variables, on top of the defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("TVMAZE"))
      .build()?
      .try_deserialize()
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }

  pub fn retry_policy(&self) -> RetryPolicy {
    RetryPolicy::new(
      self.max_retries,
      Duration::from_millis(self.retry_base_delay_ms),
    )
  }

  pub fn rate_limiter(&self) -> RateLimiter {
    RateLimiter::new(
      self.rate_limit_permits,
      Duration::from_millis(self.rate_limit_window_ms),
    )
  }

  pub fn exhausted_policy(&self) -> ExhaustedPolicy {
    match self.on_exhausted {
      ExhaustedMode::Stop => ExhaustedPolicy::Stop,
      ExhaustedMode::Poll => ExhaustedPolicy::Poll {
        interval: Duration::from_secs(self.poll_interval_secs),
      },
    }
  }

  /// `store_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf {
    tvmaze_store_sqlite::expand_tilde(&self.store_path)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn from_toml(toml: &str) -> ScraperConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_file_gives_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.base_url, "https://api.tvmaze.com");
    assert_eq!(cfg.shows_per_page, 250);
    assert_eq!(cfg.retry_policy(), RetryPolicy::default());
    assert_eq!(cfg.exhausted_policy(), ExhaustedPolicy::Poll {
      interval: Duration::from_secs(3600),
    });
  }

  #[test]
  fn file_overrides_defaults() {
    let cfg = from_toml(
      r#"
        base_url = "http://localhost:9000"
        shows_per_page = 14
        on_exhausted = "stop"
        max_retries = 5
      "#,
    );
    assert_eq!(cfg.base_url, "http://localhost:9000");
    assert_eq!(cfg.shows_per_page, 14);
    assert_eq!(cfg.exhausted_policy(), ExhaustedPolicy::Stop);
    assert_eq!(cfg.retry_policy().max_retries(), 5);
    // Untouched keys keep their defaults.
    assert_eq!(cfg.rate_limit_permits, 10);
  }
}
