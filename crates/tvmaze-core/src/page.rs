//! Offset/limit paging over the stored catalog.

use crate::{Error, Result};

/// Number of shows per page when the caller does not ask for a positive size.
pub const DEFAULT_PER_PAGE: u32 = 25;

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowPage {
  page:     u32,
  per_page: u32,
}

impl ShowPage {
  /// Validate a raw page request.
  ///
  /// `page` must be at least 1. A non-positive `per_page` falls back to
  /// [`DEFAULT_PER_PAGE`].
  pub fn new(page: i64, per_page: i64) -> Result<Self> {
    let page = u32::try_from(page)
      .ok()
      .filter(|p| *p >= 1)
      .ok_or(Error::InvalidPage(page))?;
    let per_page = u32::try_from(per_page)
      .ok()
      .filter(|k| *k >= 1)
      .unwrap_or(DEFAULT_PER_PAGE);
    Ok(Self { page, per_page })
  }

  pub fn page(&self) -> u32 { self.page }

  pub fn per_page(&self) -> u32 { self.per_page }

  /// Rows to skip: `(page - 1) * per_page`.
  pub fn offset(&self) -> u64 {
    u64::from(self.page - 1) * u64::from(self.per_page)
  }

  pub fn limit(&self) -> u64 { u64::from(self.per_page) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_page_starts_at_zero() {
    let p = ShowPage::new(1, 25).unwrap();
    assert_eq!(p.offset(), 0);
    assert_eq!(p.limit(), 25);
  }

  #[test]
  fn offset_is_previous_pages() {
    let p = ShowPage::new(3, 10).unwrap();
    assert_eq!(p.offset(), 20);
  }

  #[test]
  fn zero_and_negative_pages_are_rejected() {
    assert!(matches!(ShowPage::new(0, 25), Err(Error::InvalidPage(0))));
    assert!(matches!(ShowPage::new(-4, 25), Err(Error::InvalidPage(-4))));
  }

  #[test]
  fn non_positive_page_size_uses_default() {
    assert_eq!(ShowPage::new(1, 0).unwrap().per_page(), DEFAULT_PER_PAGE);
    assert_eq!(ShowPage::new(1, -3).unwrap().per_page(), DEFAULT_PER_PAGE);
  }
}
