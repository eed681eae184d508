//! System endpoints: service banner and health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use vela_db::Database;

/// `GET /` - service banner with the endpoint listing.
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "Vela POS API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "products": "/products",
            "categories": "/categories",
            "checkout": "POST /transactions",
            "reports": "/reports?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD",
            "reports_today": "/reports/today",
            "health": "/health"
        }
    }))
}

/// `GET /health` - liveness plus a database ping.
///
/// Returns 503 when the database does not answer, so load balancers stop
/// routing to a server that cannot serve checkouts.
pub async fn health(State(db): State<Database>) -> (StatusCode, Json<Value>) {
    if db.health_check().await {
        (
            StatusCode::OK,
            Json(json!({"status": "ok", "database": "up"})),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "degraded", "database": "down"})),
        )
    }
}
