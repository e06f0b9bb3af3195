#![allow(unused)]
//! HTTP API integration harness.
//!
//! # What this covers
//!
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`, so no
//! port is bound and no daily source is contacted.
//!
//! - **`/search`**: wire names, match kinds, `limit`, missing `q`.
//! - **`/today`**: 503 while disabled, loading or failed; 200 once a dataset
//!   has been set; last good dataset survives a failed reload.
//! - **`/healthz`**: liveness.
//!
//! # Running
//!
//! ```sh
//! cargo test --test server_harness
//! ```

mod common;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::*;
use http_body_util::BodyExt;
use pokesrc::server::{router, ApiState};
use pokesrc_core::Dex;
use pokesrc_feeds::FeedError;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn app(daily_enabled: bool) -> (ApiState, Router) {
    let state = ApiState::new(Dex::embedded(), daily_enabled);
    (state.clone(), router(state))
}

// ---------------------------------------------------------------------------
// /search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_returns_hits_with_wire_names() {
    let (_, app) = app(false);
    // ㅍㅋㅊ percent-encoded
    let (status, body) = get_json(app, "/search?q=%E3%85%8D%E3%85%8B%E3%85%8A").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "koreanName": "피카츄", "name": "pikachu", "match": "choseong" }])
    );
}

#[tokio::test]
async fn search_reports_english_matches() {
    let (_, app) = app(false);
    let (_, body) = get_json(app, "/search?q=Pika").await;
    assert_eq!(body[0]["match"], "english");
}

#[tokio::test]
async fn search_without_query_is_empty() {
    let (_, app) = app(false);
    let (status, body) = get_json(app.clone(), "/search").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, body) = get_json(app, "/search?q=").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn search_honours_limit() {
    let (_, app) = app(false);
    let (_, body) = get_json(app, "/search?q=saur&limit=2").await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["koreanName"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["이상해씨", "이상해풀"]);
}

#[tokio::test]
async fn search_rejects_bad_limit() {
    let (_, app) = app(false);
    let (status, _) = get(app, "/search?q=a&limit=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// /today
// ---------------------------------------------------------------------------

#[tokio::test]
async fn today_unavailable_without_source() {
    let (_, app) = app(false);
    let (status, body) = get(app, "/today").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(String::from_utf8(body).unwrap(), "daily dataset is not configured");
}

#[tokio::test]
async fn today_unavailable_until_loaded() {
    let (state, app) = app(true);
    let (status, _) = get(app.clone(), "/today").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    state.set_daily(Ok(DailyPicksBuilder::new()
        .date("2026-10-19")
        .pokemon(25, "pikachu", "피카츄")
        .build()));

    let (status, body) = get_json(app, "/today").await;
    assert_eq!(status, StatusCode::OK);
    insta::assert_json_snapshot!(body, @r###"
    {
      "date": "2026-10-19",
      "pokemon": [
        {
          "id": 25,
          "koreanName": "피카츄",
          "name": "pikachu",
          "sprite": "https://img.example/25.png"
        }
      ]
    }
    "###);
}

#[tokio::test]
async fn today_keeps_last_good_dataset() {
    let (state, app) = app(true);
    state.set_daily(Err(FeedError::Misconfigured("first load".into())));
    let (status, body) = get(app.clone(), "/today").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(String::from_utf8(body).unwrap().contains("first load"));

    state.set_daily(Ok(DailyPicksBuilder::new().pokemon(151, "mew", "뮤").build()));
    state.set_daily(Err(FeedError::Misconfigured("reload".into())));
    let (status, body) = get_json(app, "/today").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pokemon"][0]["name"], "mew");
    assert!(body.get("date").is_none());
}

// ---------------------------------------------------------------------------
// /healthz
// ---------------------------------------------------------------------------

#[tokio::test]
async fn healthz_is_ok() {
    let (_, app) = app(false);
    let (status, body) = get(app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}
