use std::convert::Infallible;
use std::ops::Deref;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use sitegate_core::{SiteCtx, SiteError};

use crate::SiteAxumError;

/// The site resolved for this request.
///
/// Rejects with 404 when nothing was resolved; use `Option<CurrentSite>` on
/// routes that also serve requests without a site.
#[derive(Debug, Clone)]
pub struct CurrentSite(pub SiteCtx);

impl Deref for CurrentSite {
    type Target = SiteCtx;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentSite
where
    S: Send + Sync,
{
    type Rejection = SiteAxumError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SiteCtx>()
            .cloned()
            .map(CurrentSite)
            .ok_or_else(|| SiteError::not_found("No site resolved for this request").into())
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentSite
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<SiteCtx>().cloned().map(CurrentSite))
    }
}
