//! Records the resolver reads from the site directory.
//!
//! All of these are owned and mutated by site administration; the resolver
//! only ever consumes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lang::Lang;

/// Identifier of a site (tenant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteId(pub String);

impl SiteId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a single site key row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteKeyId(pub String);

/// The authoritative tenant record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    /// Unique legacy slug, used when no site key matches.
    pub slug: String,
    pub is_active: bool,
}

/// A custom domain bound directly to a site.
///
/// Usable only when both `is_active` and `site_active` hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainBinding {
    /// Lowercase, no port.
    pub domain: String,
    pub site_id: SiteId,
    pub default_lang: Lang,
    pub is_active: bool,
    pub site_active: bool,
}

impl DomainBinding {
    pub fn is_usable(&self) -> bool {
        self.is_active && self.site_active
    }
}

/// Slug and state of the key a site key redirects to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectTarget {
    pub slug: String,
    pub is_active: bool,
}

/// One addressable `(lang, slug)` name for a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteKey {
    pub id: SiteKeyId,
    pub site_id: SiteId,
    pub lang: Lang,
    pub slug: String,
    pub is_active: bool,
    pub is_primary: bool,
    pub redirect_to: Option<RedirectTarget>,
    pub created_at: DateTime<Utc>,
}

impl SiteKey {
    /// The redirect target, if it exists and is itself active.
    pub fn active_redirect(&self) -> Option<&RedirectTarget> {
        self.redirect_to.as_ref().filter(|t| t.is_active)
    }
}

/// Primary key projection: only the slug is needed for canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub slug: String,
}
