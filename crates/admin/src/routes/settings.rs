//! Storage settings route handlers.

use axum::{Json, extract::State};
use multilingual_core::StorageMode;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::state::AppState;

/// Current storage mode.
#[derive(Debug, Serialize, Deserialize)]
pub struct StorageSettings {
    pub mode: StorageMode,
}

pub async fn storage(State(state): State<AppState>) -> Json<StorageSettings> {
    Json(StorageSettings {
        mode: state.settings().storage_mode().await,
    })
}

/// Switch storage mode. Existing metafields are not migrated.
#[instrument(skip(state))]
pub async fn update_storage(
    State(state): State<AppState>,
    Json(update): Json<StorageSettings>,
) -> Json<StorageSettings> {
    state.settings().set_storage_mode(update.mode).await;
    Json(update)
}
