//! Resolver diagnostics.
//!
//! The resolver reports every decision point to a [`Diagnostics`] sink handed
//! to it at construction time. Production code uses [`TracingDiagnostics`];
//! tests use [`RecordingDiagnostics`] and assert on what was emitted.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::lang::Lang;
use crate::records::SiteId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveEvent {
    /// Domain resolution skipped: the host is local.
    LoopbackHost { host: String },
    /// No usable binding for the host; falling back to the path.
    DomainMiss { host: String },
    DomainMatched { host: String, site_id: SiteId, lang: Lang },
    /// A binding exists but the site is not published in this language.
    InstanceMissing { host: String, site_id: SiteId, lang: String },
    InvalidLang { lang: String, path: String },
    LegacySlug { lang: Lang, slug: String, site_id: SiteId },
    SlugNotFound { lang: Lang, slug: String },
    /// The key carries an explicit redirect.
    RedirectFollowed { lang: Lang, from: String, to: String },
    /// A non-primary alias was consolidated onto the primary key.
    AliasRedirect { lang: Lang, from: String, to: String },
    InactiveSite { site_id: SiteId },
    PathMatched { lang: Lang, slug: String, site_id: SiteId, redirected: bool },
    LookupFailed { path: String, lang: Option<String>, slug: Option<String>, error: String },
}

pub trait Diagnostics: Send + Sync {
    fn record(&self, event: &ResolveEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, event: &ResolveEvent) {
        match event {
            ResolveEvent::LoopbackHost { host } => {
                debug!(host = %host, "loopback host, skipping domain resolution")
            }
            ResolveEvent::DomainMiss { host } => {
                debug!(host = %host, "no active domain binding")
            }
            ResolveEvent::DomainMatched { host, site_id, lang } => {
                debug!(host = %host, site_id = %site_id, lang = %lang, "resolved by domain")
            }
            ResolveEvent::InstanceMissing { host, site_id, lang } => {
                info!(host = %host, site_id = %site_id, lang = %lang, "no site instance for language, falling back to path")
            }
            ResolveEvent::InvalidLang { lang, path } => {
                debug!(lang = %lang, path = %path, "unsupported language")
            }
            ResolveEvent::LegacySlug { lang, slug, site_id } => {
                info!(lang = %lang, slug = %slug, site_id = %site_id, "resolved by legacy site slug")
            }
            ResolveEvent::SlugNotFound { lang, slug } => {
                debug!(lang = %lang, slug = %slug, "no site for slug")
            }
            ResolveEvent::RedirectFollowed { lang, from, to } => {
                debug!(lang = %lang, from = %from, to = %to, "site key redirect")
            }
            ResolveEvent::AliasRedirect { lang, from, to } => {
                debug!(lang = %lang, from = %from, to = %to, "alias redirected to primary key")
            }
            ResolveEvent::InactiveSite { site_id } => {
                warn!(site_id = %site_id, "site key points at an inactive site")
            }
            ResolveEvent::PathMatched { lang, slug, site_id, redirected } => {
                debug!(lang = %lang, slug = %slug, site_id = %site_id, redirected = redirected, "resolved by path")
            }
            ResolveEvent::LookupFailed { path, lang, slug, error: err } => {
                error!(path = %path, lang = ?lang, slug = ?slug, error = %err, "site lookup failed")
            }
        }
    }
}

/// Keeps every event in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    events: Arc<Mutex<Vec<ResolveEvent>>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ResolveEvent> {
        self.events.lock().clone()
    }

    pub fn contains(&self, pred: impl Fn(&ResolveEvent) -> bool) -> bool {
        self.events.lock().iter().any(pred)
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn record(&self, event: &ResolveEvent) {
        self.events.lock().push(event.clone());
    }
}
