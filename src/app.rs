use std::sync::Arc;

use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{extract::State, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cloudant::DocumentStore;
use crate::handlers;

/// Shared handler state: the injected document-store client.
///
/// Constructed once before the listener starts and read-only afterwards;
/// handlers perform independent, side-effect-free queries against it.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(api_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/patients", get(handlers::patients::list))
        .route("/api/login/user", post(handlers::login::user))
        .route("/api/getInfo/patients/:id", get(handlers::patients::info))
        .route("/api/getInfo/prescription/:id", get(handlers::prescriptions::get))
        .route("/api/appointments/list/:id", get(handlers::appointments::list))
        .route("/api/listObs/:id", get(handlers::observations::list))
}

/// Any origin: the legacy consumer calls this API from a browser.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Health Records API",
        "version": version,
        "description": "Read-only patient records facade over Cloudant, seeded from CSV fixtures",
        "endpoints": {
            "patients": "GET /api/patients",
            "login": "POST /api/login/user",
            "patient_info": "GET /api/getInfo/patients/:id",
            "prescriptions": "GET /api/getInfo/prescription/:id",
            "appointments": "GET /api/appointments/list/:id",
            "observations": "GET /api/listObs/:id",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "cloudant": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "cloudant_error": e.to_string()
            })),
        ),
    }
}
