//! Fake daily dataset API for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /today` with whatever status, body and delay the
//! test configured, and counts the requests it saw.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn demo() {
//! use common::fake_daily_api::FakeDailyApi;
//!
//! let api = FakeDailyApi::start().await.unwrap();
//! api.respond(200, r#"[{"id":25,"name":"pikachu"}]"#).await;
//!
//! // Point an HttpSource at api.base_url()
//! let url = api.base_url();
//! # }
//! ```

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

struct Reply {
    status: StatusCode,
    body: String,
    delay: Duration,
}

impl Default for Reply {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            body: "[]".to_string(),
            delay: Duration::ZERO,
        }
    }
}

#[derive(Default)]
struct ApiState {
    reply: Mutex<Reply>,
    hits: AtomicUsize,
}

/// Handle to the running fake API server.
pub struct FakeDailyApi {
    addr: SocketAddr,
    state: Arc<ApiState>,
}

impl FakeDailyApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(ApiState::default());

        let app = Router::new()
            .route("/today", get(today))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Reply to `/today` with `status` and `body` from now on.
    pub async fn respond(&self, status: u16, body: &str) {
        let mut reply = self.state.reply.lock().await;
        reply.status = StatusCode::from_u16(status).unwrap();
        reply.body = body.to_string();
    }

    /// Hold every reply for `delay` before answering.
    pub async fn delay(&self, delay: Duration) {
        self.state.reply.lock().await.delay = delay;
    }

    /// Number of `/today` requests served so far.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

async fn today(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let (status, body, delay) = {
        let reply = state.reply.lock().await;
        (reply.status, reply.body.clone(), reply.delay)
    };
    tokio::time::sleep(delay).await;
    (status, [("content-type", "application/json")], body)
}
