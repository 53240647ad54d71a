use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::api::format;
use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/patients - every patient document, returned verbatim
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.store.all_docs("patients").await {
        Ok(docs) => Ok(Json(Value::Array(docs))),
        Err(err) => {
            tracing::error!("error listing patients: {}", err);
            Err(ApiError::internal_server_error("Error listing patients"))
        }
    }
}

/// GET /api/getInfo/patients/:id - legacy HCCMAREA envelope for one patient
pub async fn info(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let docs = state
        .store
        .find("patients", json!({ "patient_id": &patient_id }))
        .await
        .map_err(|err| {
            tracing::error!("error getting patient data for {}: {}", patient_id, err);
            ApiError::internal_server_error(format!("Error getting patient data for {patient_id}"))
        })?;

    match docs.first() {
        Some(patient) => Ok(Json(format::patient_info_envelope(patient))),
        None => Err(ApiError::not_found(format!("Patient with ID {patient_id} not found"))),
    }
}
