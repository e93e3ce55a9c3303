//! Host header normalization and loopback classification.
//!
//! Both functions are pure: they never fail and never touch the directory.

use once_cell::sync::Lazy;
use regex::Regex;

static IPV4: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("static regex"));

// Permissive on purpose: anything shaped like 2-8 colon separated hextets.
static IPV6: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-f]{0,4}(:[0-9a-f]{0,4}){1,7}$").expect("static regex"));

/// Normalize a raw `Host` / `X-Forwarded-Host` value.
///
/// Accepts every value the header carried (proxies sometimes repeat it) and
/// only looks at the first one. Anything after a comma is dropped, a trailing
/// `:port` is stripped and the result is lowercased. Bracketed IPv6 literals
/// (`[::1]:8080`) lose their brackets so they classify as loopback.
///
/// Returns `None` when no value was present at all, or when nothing is left
/// once the port and later hops are stripped (`""`, `:8080`).
pub fn normalize_host<I, S>(values: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let first = values.into_iter().next()?;
    let host = first.as_ref().split(',').next().unwrap_or_default().trim();

    let host = if let Some(rest) = host.strip_prefix('[') {
        rest.split(']').next().unwrap_or_default()
    } else {
        strip_port(host)
    };

    if host.is_empty() {
        return None;
    }
    Some(host.to_lowercase())
}

fn strip_port(host: &str) -> &str {
    // A bare IPv6 literal has several colons and no port to strip.
    match host.rsplit_once(':') {
        Some((name, port))
            if !name.contains(':') && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) =>
        {
            name
        }
        _ => host,
    }
}

/// Whether a normalized host is a local/dev address that must never take
/// part in domain-based resolution.
///
/// Everything else, including unregistered staging domains, counts as a
/// real custom domain.
pub fn is_loopback_host(host: &str) -> bool {
    host == "localhost"
        || host.starts_with("localhost.")
        || IPV4.is_match(host)
        || IPV6.is_match(host)
}
