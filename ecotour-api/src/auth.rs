use axum::http::HeaderMap;

use crate::error::ApiError;
use crate::state::AppState;

pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Admin gate: a static shared secret supplied per request, compared against
/// the configured value. Checked at the top of every admin handler.
pub fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let supplied = headers
        .get(ADMIN_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());

    if supplied != Some(state.admin.secret.as_str()) {
        return Err(ApiError::AdminOnly);
    }

    Ok(())
}
