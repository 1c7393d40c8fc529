//! Liveness, readiness and build info for the HBnB service. `/ready` answers 503
//! while the database is unreachable.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Probe {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct ServiceInfo {
    name: &'static str,
    version: &'static str,
}

async fn liveness() -> Json<Probe> {
    Json(Probe {
        status: "ok",
        database: None,
    })
}

async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Probe>) {
    let (code, status, database) = match sqlx::query("SELECT 1").fetch_optional(state.manager.pool()).await {
        Ok(_) => (StatusCode::OK, "ok", "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "database unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };
    (
        code,
        Json(Probe {
            status,
            database: Some(database),
        }),
    )
}

async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
        .route("/version", get(service_info))
        .with_state(state)
}
