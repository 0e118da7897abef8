//! JSON client API used by the mobile app: stove status and controls.

use axum::{
    extract::{rejection::FormRejection, Path, State},
    Form, Json,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::models::{ControlUpdate, StoveDocument};
use crate::session::CurrentSession;
use crate::state::AppState;
use crate::utils::error::ApiError;

/// GET /api/client/{stove_id}/status
pub async fn stove_status(
    Path(stove_id): Path<String>,
    session: CurrentSession,
) -> Result<Json<StoveDocument>, ApiError> {
    let (_, record) = session.require()?;

    let document = record
        .stoves
        .get(&stove_id)
        .cloned()
        .ok_or_else(|| ApiError::StoveNotRegistered {
            stove_id: stove_id.clone(),
            user: record.user.clone(),
        })?;

    debug!("Serving status of stove {} to {}", stove_id, record.user);
    Ok(Json(document))
}

/// POST /api/client/{stove_id}/controls
pub async fn stove_controls(
    State(state): State<AppState>,
    Path(stove_id): Path<String>,
    session: CurrentSession,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<&'static str, ApiError> {
    let (id, _) = session.require()?;

    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            warn!("Unreadable controls form for stove {}: {}", stove_id, rejection);
            HashMap::new()
        }
    };
    let update = ControlUpdate::from_form(&fields);

    // The session may have expired or been logged out since it was resolved.
    let controls = state
        .sessions
        .store
        .update(id, |record| match record.stoves.get_mut(&stove_id) {
            Some(stove) => {
                update.apply_to(&mut stove.controls);
                Ok(stove.controls.clone())
            }
            None => Err(ApiError::StoveNotRegistered {
                stove_id: stove_id.clone(),
                user: record.user.clone(),
            }),
        })
        .ok_or(ApiError::Unauthorized)??;

    info!(
        "Updated controls for {}: {}",
        stove_id,
        serde_json::to_string_pretty(&controls).unwrap_or_default()
    );
    Ok("OK")
}
