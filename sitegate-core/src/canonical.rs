//! Canonical URL reconstruction.
//!
//! Sites are mounted under exactly two path shapes, `/{lang}/{slug}/...` and
//! `/api/public/{lang}/{slug}/...`, so the rewrite is a short list of literal
//! substitutions rather than a template engine.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::lang::Lang;

const PUBLIC_API_PREFIX: &str = "/api/public";

/// Bytes that cannot appear verbatim inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Redirect target for a request whose (decoded, trimmed) `slug` should be
/// replaced by `canonical_slug`.
///
/// The rewrite operates on the raw request target, so the slug is first
/// located there in its encoded form, and the canonical slug is encoded as a
/// path segment before substitution.
pub fn canonical_redirect_url(url: &str, slug: &str, canonical_slug: &str, lang: Lang) -> String {
    let old = slug_segment(url, slug, lang).unwrap_or(slug);
    let new: Cow<'_, str> = utf8_percent_encode(canonical_slug, SEGMENT).into();
    build_canonical_url(url, &old, &new, lang)
}

/// The raw path segment right after a `/{lang}/` whose decoded, trimmed
/// value equals `slug`.
fn slug_segment<'a>(url: &'a str, slug: &str, lang: Lang) -> Option<&'a str> {
    let path = url.split('?').next().unwrap_or_default();
    let lang_segment = format!("/{lang}/");

    path.match_indices(&lang_segment).find_map(|(idx, _)| {
        let rest = &path[idx + lang_segment.len()..];
        let raw = rest.split('/').next().unwrap_or_default();
        let decoded = percent_decode_str(raw).decode_utf8().ok()?;
        (decoded.trim() == slug).then_some(raw)
    })
}

/// Rewrite `url` so that `old_slug` becomes `canonical_slug`.
///
/// `url` is the raw request target: path plus an optional `?query`. The query
/// is re-appended byte for byte. Shapes are tried in order and the first one
/// that matches wins; when none match, the canonical slug is inserted right
/// after `/{lang}/`. Never fails: worst case the path comes back unchanged.
pub fn build_canonical_url(url: &str, old_slug: &str, canonical_slug: &str, lang: Lang) -> String {
    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    };

    let mut out = rewrite_path(path, old_slug, canonical_slug, lang.as_str());
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    out
}

fn rewrite_path(path: &str, old: &str, new: &str, lang: &str) -> String {
    let api_segment = format!("{PUBLIC_API_PREFIX}/{lang}/{old}/");
    if path.contains(&api_segment) {
        return path.replacen(&api_segment, &format!("{PUBLIC_API_PREFIX}/{lang}/{new}/"), 1);
    }

    let segment = format!("/{lang}/{old}/");
    if path.contains(&segment) {
        return path.replacen(&segment, &format!("/{lang}/{new}/"), 1);
    }

    let tail = format!("/{lang}/{old}");
    if let Some(head) = path.strip_suffix(&tail) {
        return format!("{head}/{lang}/{new}");
    }

    let api_tail = format!("{PUBLIC_API_PREFIX}/{lang}/{old}");
    if let Some(head) = path.strip_suffix(&api_tail) {
        return format!("{head}{PUBLIC_API_PREFIX}/{lang}/{new}");
    }

    let lang_segment = format!("/{lang}/");
    match path.find(&lang_segment) {
        Some(idx) => {
            let split = idx + lang_segment.len();
            format!("{}{new}/{}", &path[..split], &path[split..])
        }
        None => path.to_string(),
    }
}
