use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use calculator::{calculate_footprint, EmissionFactors};
use serde_json::{Map, Value};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{FootprintResult, Submission, CALCULATE_PATH},
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};

mod config;

use config::load_settings;

#[derive(Clone)]
struct AppState {
    factors: EmissionFactors,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings()?;
    let state = AppState {
        factors: settings.factors,
    };
    let app = build_router(Arc::new(state), settings.request_body_limit_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(CALCULATE_PATH, post(calculate))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn calculate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<FootprintResult>> {
    let Json(body) = payload.map_err(|rejection| {
        warn!(%rejection, "rejected calculate request body");
        (
            rejection.status(),
            Json(ApiError::new(ErrorCode::Validation, rejection.body_text())),
        )
    })?;
    let submission = Submission::try_from(body).map_err(|e| {
        warn!(error = %e.message, "rejected calculate request field");
        (StatusCode::BAD_REQUEST, Json(e))
    })?;

    let result = calculate_footprint(&submission, &state.factors).map_err(|e| {
        warn!(error = %e.message, "footprint calculation failed");
        (StatusCode::BAD_REQUEST, Json(e))
    })?;

    info!(
        total = %result.total_annual_footprint.text(),
        trees = %result.trees_to_offset.text(),
        "footprint calculated"
    );
    Ok(Json(result))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
