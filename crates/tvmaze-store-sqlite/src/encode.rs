//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Birthdays are stored as `YYYY-MM-DD` text so that lexical order is
//! chronological order.

use chrono::NaiveDate;
use tvmaze_core::show::{Person, PersonId, Show, ShowId};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// A `persons` row as read from or written to SQLite.
#[derive(Debug)]
pub struct RawPerson {
  pub person_id: PersonId,
  pub name:      String,
  pub birthday:  Option<String>,
}

impl RawPerson {
  pub fn from_person(p: &Person) -> Self {
    Self {
      person_id: p.id,
      name:      p.name.clone(),
      birthday:  p.birthday.map(encode_date),
    }
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:       self.person_id,
      name:     self.name,
      birthday: self.birthday.as_deref().map(decode_date).transpose()?,
    })
  }
}

/// A show row plus its cast rows.
#[derive(Debug)]
pub struct RawShow {
  pub show_id: ShowId,
  pub name:    String,
  pub cast:    Vec<RawPerson>,
}

impl RawShow {
  /// Encode a show for merging. The cast is de-duplicated here so every
  /// backend call sees at most one row per person.
  pub fn for_merge(show: &Show) -> Self {
    Self {
      show_id: show.id,
      name:    show.name.clone(),
      cast:    show
        .deduplicated_cast()
        .into_iter()
        .map(RawPerson::from_person)
        .collect(),
    }
  }

  pub fn into_show(self) -> Result<Show> {
    Ok(Show {
      id:   self.show_id,
      name: self.name,
      cast: self
        .cast
        .into_iter()
        .map(RawPerson::into_person)
        .collect::<Result<_>>()?,
    })
  }
}
