use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::format;
use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "UID")]
    pub uid: String,
    /// Accepted for wire compatibility; the legacy flow never checks it.
    #[serde(rename = "PASS", default)]
    pub pass: String,
}

/// POST /api/login/user - look up a patient by user id, legacy result set
pub async fn user(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let LoginRequest { uid, pass: _ } = request;

    let docs = state
        .store
        .find("patients", json!({ "user_id": &uid }))
        .await
        .map_err(|err| {
            tracing::error!("error during login for user \"{}\": {}", uid, err);
            ApiError::internal_server_error(format!("Error during login for user \"{uid}\""))
        })?;

    match docs.first() {
        Some(patient) => Ok(Json(format::result_set(vec![format::patient_legacy(patient)]))),
        None => Err(ApiError::not_found(format!("User \"{uid}\" not found"))),
    }
}
