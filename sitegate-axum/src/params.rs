use axum::extract::RawPathParams;
use axum::http::{header, HeaderMap, Uri};
use sitegate_core::SiteRequest;

pub const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Collect what the resolver needs from request parts.
///
/// Host values come from `X-Forwarded-Host` when trusted and present, then
/// `Host`, then the URI authority (HTTP/2 requests may carry no `Host`).
pub fn site_request_from_parts(
    headers: &HeaderMap,
    uri: &Uri,
    params: Option<&RawPathParams>,
    trust_forwarded_host: bool,
) -> SiteRequest {
    let url = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let mut out = SiteRequest::new(url);
    out.host = host_values(headers, uri, trust_forwarded_host);

    if let Some(params) = params {
        for (name, value) in params.iter() {
            out = out.with_param(name, value);
        }
    }

    out
}

fn host_values(headers: &HeaderMap, uri: &Uri, trust_forwarded_host: bool) -> Vec<String> {
    let read = |name: &str| -> Vec<String> {
        headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    };

    if trust_forwarded_host {
        let forwarded = read(X_FORWARDED_HOST);
        if !forwarded.is_empty() {
            return forwarded;
        }
    }

    let host = read(header::HOST.as_str());
    if !host.is_empty() {
        return host;
    }

    uri.authority()
        .map(|a| vec![a.as_str().to_string()])
        .unwrap_or_default()
}
