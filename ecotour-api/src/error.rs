use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use ecotour_domain::BookingError;

/// Maps the domain error taxonomy onto HTTP statuses and an `{error, code}`
/// JSON body.
#[derive(Debug)]
pub enum ApiError {
    Domain(BookingError),
    AdminOnly,
}

impl ApiError {
    pub fn tour_not_found(tour_id: i64) -> Self {
        Self::Domain(BookingError::TourNotFound(tour_id))
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::AdminOnly => (StatusCode::FORBIDDEN, "ADMIN_ONLY", "Admin only".to_string()),
            ApiError::Domain(err) => match err {
                BookingError::InvalidInput(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", err.to_string())
                }
                BookingError::TourNotFound(_) => {
                    (StatusCode::NOT_FOUND, "TOUR_NOT_FOUND", err.to_string())
                }
                BookingError::CapacityExceeded { .. } => {
                    (StatusCode::CONFLICT, "CAPACITY_EXCEEDED", err.to_string())
                }
                BookingError::Store(msg) => {
                    // Internal detail stays in the logs.
                    tracing::error!("store failure: {}", msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORE_FAILURE",
                        "Internal Server Error".to_string(),
                    )
                }
            },
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let ApiError::Domain(BookingError::CapacityExceeded { available, .. }) = &self {
            body["available"] = json!(available);
        }

        (status, Json(body)).into_response()
    }
}

/// `Json` with the stock rejection replaced by the structured 400 body, so
/// malformed or unknown-field payloads fail the same way as field-level
/// validation.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| BookingError::InvalidInput(rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}
