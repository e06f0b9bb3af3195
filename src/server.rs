//! HTTP API — the search and showcase data as JSON over axum.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /search?q=<query>[&limit=N]` | `200 [{ "koreanName", "name", "match" }]` |
//! | `GET /today` | `200` daily dataset, or `503` until one has loaded |
//! | `GET /healthz` | `200 ok` |

use std::sync::{Arc, PoisonError, RwLock};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use pokesrc_core::{search_hits, DailyPicks, Dex};
use pokesrc_feeds::DailyUpdate;
use serde::Deserialize;
use thiserror::Error;
use tokio::{net::TcpListener, signal};
use tracing::info;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("daily dataset is not configured")]
    DailyDisabled,

    #[error("daily dataset not loaded yet")]
    DailyLoading,

    #[error("daily dataset unavailable: {0}")]
    DailyFailed(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Every variant means "no dataset to show".
        (StatusCode::SERVICE_UNAVAILABLE, self.to_string()).into_response()
    }
}

#[derive(Debug, Default)]
struct DailySlot {
    enabled: bool,
    picks: Option<DailyPicks>,
    error: Option<String>,
}

/// Shared handler state.
#[derive(Clone)]
pub struct ApiState {
    dex: Arc<Dex>,
    daily: Arc<RwLock<DailySlot>>,
}

impl ApiState {
    /// `daily_enabled` is false when no daily source is configured.
    pub fn new(dex: Dex, daily_enabled: bool) -> Self {
        Self {
            dex: Arc::new(dex),
            daily: Arc::new(RwLock::new(DailySlot {
                enabled: daily_enabled,
                ..DailySlot::default()
            })),
        }
    }

    pub fn dex(&self) -> &Dex {
        &self.dex
    }

    /// Record a daily (re)load. A failed reload keeps the last good dataset.
    pub fn set_daily(&self, update: DailyUpdate) {
        let mut slot = self.daily.write().unwrap_or_else(PoisonError::into_inner);
        match update {
            Ok(picks) => {
                slot.picks = Some(picks);
                slot.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "daily load failed");
                slot.error = Some(e.to_string());
            }
        }
    }

    /// A sink for [`crate::daily::spawn_daily`].
    pub fn daily_sink(&self) -> impl Fn(DailyUpdate) + Send + 'static {
        let state = self.clone();
        move |update| state.set_daily(update)
    }

    fn today(&self) -> Result<DailyPicks, ApiError> {
        let slot = self.daily.read().unwrap_or_else(PoisonError::into_inner);
        match (&slot.picks, &slot.error) {
            (Some(picks), _) => Ok(picks.clone()),
            _ if !slot.enabled => Err(ApiError::DailyDisabled),
            (None, Some(e)) => Err(ApiError::DailyFailed(e.clone())),
            (None, None) => Err(ApiError::DailyLoading),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
}

async fn search_handler(
    State(state): State<ApiState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let hits = search_hits(&params.q, state.dex(), params.limit);
    tracing::debug!(q = %params.q, hits = hits.len(), "GET /search");
    Json(hits).into_response()
}

async fn today_handler(State(state): State<ApiState>) -> Result<Json<DailyPicks>, ApiError> {
    state.today().map(Json)
}

async fn healthz_handler() -> &'static str {
    "ok"
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/search", get(search_handler))
        .route("/today", get(today_handler))
        .route("/healthz", get(healthz_handler))
        .with_state(state)
}

/// Bind `address` and serve until Ctrl+C or SIGTERM.
pub async fn serve(address: &str, state: ApiState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
