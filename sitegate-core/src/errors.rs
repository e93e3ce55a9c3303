//! # Errors
//!
//! Site resolution fails in exactly two classified ways: the request named a
//! language we do not serve (`BadRequest`) or no site could be resolved
//! (`NotFound`). Everything else is a lookup failure and travels through
//! `anyhow::Error` unclassified until the transport turns it into a
//! `GeneralError`.
//!
//! - consistent status codes + class names
//! - can be carried through anyhow::Error
//! - transport-agnostic (the adapter crate decides how to serialize)

use std::fmt;

use anyhow::Error as AnyError;
use serde_json::Value;

/// A convenience result type for sitegate APIs that can fail unclassified.
pub type SiteResult<T> = std::result::Result<T, AnyError>;

/// Error class names + status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,   // 400
    NotFound,     // 404
    GeneralError, // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::GeneralError => 500,
        }
    }

    /// Error `name` (e.g. "NotFound")
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::GeneralError => "GeneralError",
        }
    }

    /// Error `className` (kebab-cased)
    pub fn class_name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad-request",
            ErrorKind::NotFound => "not-found",
            ErrorKind::GeneralError => "general-error",
        }
    }
}

/// A structured resolution error that can live inside `anyhow::Error`.
#[derive(Debug)]
pub struct SiteError {
    pub kind: ErrorKind,
    pub message: String,
    pub data: Option<Value>,
    pub source: Option<AnyError>,
}

impl SiteError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: None,
            source: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    /// Convert into `anyhow::Error`.
    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Find a `SiteError` anywhere in an `anyhow::Error` chain, so
    /// `.context(..)` wrappers do not hide the classification.
    pub fn from_anyhow(err: &AnyError) -> Option<&SiteError> {
        err.chain().find_map(|e| e.downcast_ref::<SiteError>())
    }

    /// Turn any error into a SiteError:
    /// - if it's already a SiteError, keep it
    /// - otherwise wrap as GeneralError
    pub fn normalize(err: AnyError) -> SiteError {
        match err.downcast::<SiteError>() {
            Ok(site) => site,
            Err(other) => {
                SiteError::new(ErrorKind::GeneralError, other.to_string()).with_source(other)
            }
        }
    }

    /// Copy suitable for returning to clients: the inner `source` is dropped.
    pub fn sanitize_for_client(&self) -> SiteError {
        SiteError {
            kind: self.kind,
            message: self.message.clone(),
            data: self.data.clone(),
            source: None,
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn general_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::GeneralError, msg)
    }

    /// JSON payload: `{name, message, code, className, data?}`.
    pub fn to_json(&self) -> Value {
        use serde_json::json;

        let mut base = json!({
            "name": self.name(),
            "message": self.message,
            "code": self.code(),
            "className": self.class_name(),
        });

        if let Some(d) = &self.data {
            base["data"] = d.clone();
        }
        base
    }
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl PartialEq for SiteError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message == other.message && self.data == other.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn classification_survives_context_wrapping() {
        let err: AnyError = Err::<(), _>(SiteError::not_found("no site").into_anyhow())
            .context("resolving /hu/acme")
            .unwrap_err();

        let site = SiteError::from_anyhow(&err).unwrap();
        assert_eq!(site.kind, ErrorKind::NotFound);
        assert_eq!(site.code(), 404);
    }

    #[test]
    fn normalize_wraps_foreign_errors_as_general() {
        let site = SiteError::normalize(anyhow::anyhow!("db down"));
        assert_eq!(site.kind, ErrorKind::GeneralError);
        assert_eq!(site.message, "db down");
        assert!(site.sanitize_for_client().source.is_none());
    }

    #[test]
    fn json_shape() {
        let body = SiteError::bad_request("Unsupported language: fr")
            .with_data(serde_json::json!({"lang": "fr"}))
            .to_json();
        assert_eq!(body["name"], "BadRequest");
        assert_eq!(body["code"], 400);
        assert_eq!(body["className"], "bad-request");
        assert_eq!(body["data"]["lang"], "fr");
    }
}
