use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::blockchain::LedgerError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body could not be decoded.
    #[error("malformed request: {0}")]
    Decode(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The blocking pool dropped the mining job.
    #[error("mining task failed: {0}")]
    Blocking(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Decode failures are reported as server errors, like the legacy API.
            ApiError::Decode(_) | ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Ledger(LedgerError::InvalidLink { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Ledger(LedgerError::IndexOverflow { .. }) => StatusCode::CONFLICT,
            ApiError::Ledger(LedgerError::MiningTimeout { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
