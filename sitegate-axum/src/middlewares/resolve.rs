//! Per-request site resolution.
//!
//! Mount with `route_layer` so matched path parameters are visible:
//!
//! ```rust,ignore
//! let routes = Router::new()
//!     .route("/{lang}/{siteKey}/", get(home))
//!     .route_layer(from_fn_with_state(state.clone(), resolve_site));
//! ```

use axum::extract::rejection::RawPathParamsRejection;
use axum::extract::{OriginalUri, RawPathParams, Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use percent_encoding::{utf8_percent_encode, CONTROLS};
use sitegate_core::Resolution;

use crate::params::site_request_from_parts;
use crate::{SiteAxumError, SiteAxumState};

/// Resolve the site for this request.
///
/// - resolved: `SiteCtx` goes into request extensions, the handler runs
/// - redirect: `301 Moved Permanently` onto the canonical URL
/// - failed: 400 / 404 JSON error
/// - directory failure: 500 JSON error
/// - nothing to resolve: the handler runs without a context
pub async fn resolve_site(
    State(state): State<SiteAxumState>,
    OriginalUri(uri): OriginalUri,
    params: Result<RawPathParams, RawPathParamsRejection>,
    mut req: Request,
    next: Next,
) -> Response {
    let site_req = site_request_from_parts(
        req.headers(),
        &uri,
        params.ok().as_ref(),
        state.resolver.options().trust_forwarded_host,
    );

    match state.resolver.resolve(&site_req).await {
        Ok(Resolution::Resolved(ctx)) => {
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Ok(Resolution::PassThrough) => next.run(req).await,
        Ok(Resolution::RedirectTo(location)) => moved_permanently(&location),
        Ok(Resolution::Failed(err)) => SiteAxumError::from(err).into_response(),
        Err(err) => SiteAxumError(err).into_response(),
    }
}

fn moved_permanently(location: &str) -> Response {
    // Header values must stay visible ASCII; `%`, `/` and `?` pass through.
    let encoded = utf8_percent_encode(location, CONTROLS).to_string();

    match HeaderValue::from_str(&encoded) {
        Ok(value) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, value)]).into_response(),
        Err(e) => SiteAxumError(anyhow::Error::new(e).context("invalid redirect location")).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_is_always_ascii() {
        let res = moved_permanently("/hu/kávé/contact?q=é");

        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        let location = res.headers().get(header::LOCATION).unwrap();
        assert_eq!(location.to_str().unwrap(), "/hu/k%C3%A1v%C3%A9/contact?q=%C3%A9");
    }

    #[test]
    fn encoded_location_is_left_as_is() {
        let res = moved_permanently("/api/public/hu/acme/contact?ref=42&x=%2F");

        let location = res.headers().get(header::LOCATION).unwrap();
        assert_eq!(location, "/api/public/hu/acme/contact?ref=42&x=%2F");
    }
}
