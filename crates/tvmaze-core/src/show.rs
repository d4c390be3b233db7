//! Shows and the people in their cast.
//!
//! Both identities are assigned upstream. A [`Person`] is shared between every
//! show that lists them, so storing a show also overwrites that person's
//! details globally.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Upstream identifier of a show.
pub type ShowId = i64;

/// Upstream identifier of a person.
pub type PersonId = i64;

// ─── Person ──────────────────────────────────────────────────────────────────

/// A cast member. Shared across shows; keyed by [`PersonId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:       PersonId,
  pub name:     String,
  /// Calendar date only; many upstream records have none.
  pub birthday: Option<NaiveDate>,
}

// ─── Show ────────────────────────────────────────────────────────────────────

/// A show together with its full cast.
///
/// The cast is replaced wholesale each time the show is stored; it is never
/// merged with a previously stored cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
  pub id:   ShowId,
  pub name: String,
  #[serde(default)]
  pub cast: Vec<Person>,
}

impl Show {
  /// A show with an empty cast.
  pub fn new(id: ShowId, name: impl Into<String>) -> Self {
    Self { id, name: name.into(), cast: Vec::new() }
  }

  /// The cast with repeated person ids removed, in encounter order.
  /// The first occurrence of an id wins.
  pub fn deduplicated_cast(&self) -> Vec<&Person> {
    let mut seen = HashSet::with_capacity(self.cast.len());
    self.cast.iter().filter(|p| seen.insert(p.id)).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn person(id: PersonId, name: &str) -> Person {
    Person { id, name: name.into(), birthday: None }
  }

  #[test]
  fn dedup_keeps_first_occurrence() {
    let show = Show {
      id:   1,
      name: "Under the Dome".into(),
      cast: vec![person(7, "first"), person(8, "other"), person(7, "second")],
    };

    let cast = show.deduplicated_cast();
    assert_eq!(cast.len(), 2);
    assert_eq!(cast[0].name, "first");
    assert_eq!(cast[1].id, 8);
  }

  #[test]
  fn dedup_of_empty_cast_is_empty() {
    assert!(Show::new(1, "x").deduplicated_cast().is_empty());
  }
}
