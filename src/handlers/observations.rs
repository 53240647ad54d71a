use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::api::format;
use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/listObs/:id - observation projections in a result-set envelope
pub async fn list(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let docs = state
        .store
        .find("observations", json!({ "patient_id": &patient_id }))
        .await
        .map_err(|err| {
            tracing::error!("error getting observations for patient \"{}\": {}", patient_id, err);
            ApiError::internal_server_error(format!(
                "Error getting observations for patient \"{patient_id}\""
            ))
        })?;

    if docs.is_empty() {
        return Err(ApiError::not_found(format!(
            "Observations not found for patient \"{patient_id}\""
        )));
    }

    let rows = docs
        .iter()
        .map(|doc| format::observation_legacy(&patient_id, doc))
        .collect();
    Ok(Json(format::result_set(rows)))
}
