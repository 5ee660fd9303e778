use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use casavida_core::error::CasaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CasaError),

    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned HTTP {status}: {body}")]
    ProviderStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an unusable payload: {detail}")]
    ProviderPayload {
        provider: &'static str,
        detail: String,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Core(CasaError::Validation(msg.into()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Core(CasaError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Core(CasaError::Validation(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("request failed: {self}");
        }
        (status, self.to_string()).into_response()
    }
}
