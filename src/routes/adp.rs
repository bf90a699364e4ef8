//! ADP endpoint
//! Serves the dataset loaded fresh from disk on every request.

use axum::extract::State;
use axum::Json;

use crate::data::AdpRecord;
use crate::routes::AppState;
use crate::service::AdpError;

/// Run blocking work off the async workers. A panicked or cancelled task
/// becomes a processing error.
async fn run_blocking<T, F>(work: F) -> Result<T, AdpError>
where
    F: FnOnce() -> Result<T, AdpError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AdpError::Processing(e.to_string()))?
}

/// `GET /adp`: the full dataset, freshly loaded.
pub async fn adp_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<AdpRecord>>, AdpError> {
    let service = state.service.clone();
    let result = run_blocking(move || service.load()).await;

    match result {
        Ok(records) => {
            tracing::info!(rows = records.len(), "served adp");
            Ok(Json(records))
        }
        Err(AdpError::NotFound) => {
            tracing::warn!(path = %state.service.data_path().display(), "adp csv missing");
            Err(AdpError::NotFound)
        }
        Err(err) => {
            tracing::error!(error = %err, "adp load failed");
            Err(err)
        }
    }
}
