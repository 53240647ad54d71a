use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::api::format;
use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/getInfo/prescription/:id - GETMEDO envelope with legacy keys
pub async fn get(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let docs = state
        .store
        .find("prescriptions", json!({ "patient_id": &patient_id }))
        .await
        .map_err(|err| {
            tracing::error!("error getting prescription data for {}: {}", patient_id, err);
            ApiError::internal_server_error(format!(
                "Error getting prescription data for {patient_id}"
            ))
        })?;

    if docs.is_empty() {
        return Err(ApiError::not_found(format!(
            "Prescription data not found for {patient_id}"
        )));
    }

    Ok(Json(format::prescription_envelope(&patient_id, &docs)))
}
