use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sitegate_core::errors::SiteError;
use tracing::error;

#[derive(Debug)]
pub struct SiteAxumError(pub anyhow::Error);

impl From<anyhow::Error> for SiteAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl From<SiteError> for SiteAxumError {
    fn from(e: SiteError) -> Self {
        Self(e.into_anyhow())
    }
}

impl IntoResponse for SiteAxumError {
    fn into_response(self) -> Response {
        // Classified errors keep their status even under anyhow contexts.
        if let Some(site) = SiteError::from_anyhow(&self.0) {
            let safe = site.sanitize_for_client();
            let status = StatusCode::from_u16(safe.code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return (status, Json(safe.to_json())).into_response();
        }

        // Fallback: wrap any unclassified error as a GeneralError; only the
        // outermost message reaches the client, the chain goes to the log.
        let chain = format!("{:#}", self.0);
        error!(error = %chain, "unclassified error");
        let safe = SiteError::normalize(self.0).sanitize_for_client();
        (StatusCode::INTERNAL_SERVER_ERROR, Json(safe.to_json())).into_response()
    }
}
