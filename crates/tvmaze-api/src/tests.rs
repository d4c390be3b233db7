//! Router tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::{Body, to_bytes},
  http::{Request, StatusCode},
};
use chrono::NaiveDate;
use tower::ServiceExt as _;
use tvmaze_core::{
  page::ShowPage,
  show::{Person, Show, ShowId},
  store::ShowStore,
};
use tvmaze_store_sqlite::SqliteStore;

use crate::{api_router, shows::ShowResponse};

async fn seeded_router(count: i64) -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let shows = (1..=count)
    .map(|id| Show::new(id, format!("show {id}")))
    .collect();
  store.merge(shows).await.unwrap();
  api_router(Arc::new(store))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
  let resp = app
    .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  (status, body.to_vec())
}

async fn get_shows(app: Router, uri: &str) -> Vec<ShowResponse> {
  let (status, body) = get(app, uri).await;
  assert_eq!(status, StatusCode::OK);
  serde_json::from_slice(&body).unwrap()
}

// ─── Paging ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn default_page_size_is_25() {
  let app = seeded_router(30).await;
  let shows = get_shows(app, "/tvshowsmaze?page=1").await;
  assert_eq!(shows.len(), 25);
  assert_eq!(shows[0].id, 1);
  assert_eq!(shows[24].id, 25);
}

#[tokio::test]
async fn explicit_page_size_slices_ascending_ids() {
  let app = seeded_router(10).await;
  let shows = get_shows(app, "/tvshowsmaze?page=2&itensPerPage=4").await;
  let ids: Vec<_> = shows.iter().map(|s| s.id).collect();
  assert_eq!(ids, vec![5, 6, 7, 8]);
}

#[tokio::test]
async fn non_positive_page_size_uses_default() {
  let app = seeded_router(30).await;
  let shows = get_shows(app, "/tvshowsmaze?page=1&itensPerPage=0").await;
  assert_eq!(shows.len(), 25);
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
  let app = seeded_router(3).await;
  assert!(get_shows(app, "/tvshowsmaze?page=9").await.is_empty());
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn zero_page_is_bad_request() {
  let app = seeded_router(1).await;
  let (status, body) = get(app, "/tvshowsmaze?page=0").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(json["error"], "Page number 0 is invalid.");
}

#[tokio::test]
async fn missing_or_negative_page_is_bad_request() {
  let (status, _) = get(seeded_router(1).await, "/tvshowsmaze").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = get(seeded_router(1).await, "/tvshowsmaze?page=-2").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_page_is_a_client_error() {
  let (status, _) = get(seeded_router(1).await, "/tvshowsmaze?page=abc").await;
  assert!(status.is_client_error());
}

// ─── Shape ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn cast_is_ordered_and_birthday_serialised_as_date() {
  let store = SqliteStore::open_in_memory().await.unwrap();
  store
    .merge(vec![Show {
      id:   1,
      name: "Under the Dome".into(),
      cast: vec![
        Person { id: 1, name: "null".into(), birthday: None },
        Person { id: 2, name: "1990".into(), birthday: NaiveDate::from_ymd_opt(1990, 1, 1) },
        Person { id: 3, name: "1995".into(), birthday: NaiveDate::from_ymd_opt(1995, 1, 1) },
      ],
    }])
    .await
    .unwrap();

  let (status, body) =
    get(api_router(Arc::new(store)), "/tvshowsmaze?page=1").await;
  assert_eq!(status, StatusCode::OK);

  let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(json[0]["id"], 1);
  assert_eq!(json[0]["name"], "Under the Dome");
  let cast = json[0]["cast"].as_array().unwrap();
  assert_eq!(cast[0]["birthday"], "1995-01-01");
  assert_eq!(cast[1]["birthday"], "1990-01-01");
  assert!(cast[2]["birthday"].is_null());
}

// ─── Failures ────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("database is locked")]
struct Locked;

struct BrokenStore;

impl ShowStore for BrokenStore {
  type Error = Locked;

  async fn merge(&self, _shows: Vec<Show>) -> Result<(), Locked> { Err(Locked) }

  async fn highest_show(&self) -> Result<Option<Show>, Locked> { Err(Locked) }

  async fn get_show(&self, _id: ShowId) -> Result<Option<Show>, Locked> {
    Err(Locked)
  }

  async fn list_shows(&self, _page: ShowPage) -> Result<Vec<Show>, Locked> {
    Err(Locked)
  }
}

#[tokio::test]
async fn store_failure_is_500_with_message_only() {
  let (status, body) =
    get(api_router(Arc::new(BrokenStore)), "/tvshowsmaze?page=1").await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

  let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(json["error"], "database is locked");
}
