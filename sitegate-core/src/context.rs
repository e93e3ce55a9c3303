//! Per-request site context and the resolver's input value.

use serde::{Deserialize, Serialize};

use crate::lang::Lang;
use crate::records::SiteId;

/// Route parameter carrying the language.
pub const LANG_PARAM: &str = "lang";
/// Route parameter carrying the site key.
pub const SITE_KEY_PARAM: &str = "siteKey";
/// Older name for [`SITE_KEY_PARAM`], still accepted.
pub const LEGACY_SITE_KEY_PARAM: &str = "tenantKey";

/// Which site and language a request is about.
///
/// Built fresh for every resolved request and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteCtx {
    pub site_id: SiteId,
    /// `None` when resolved by custom domain.
    pub canonical_key: Option<String>,
    /// Whether the matched key was not the primary one.
    pub redirected: bool,
    pub lang: Lang,
}

/// Everything the resolver looks at for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteRequest {
    /// Raw header values, first one wins.
    pub host: Vec<String>,
    pub lang: Option<String>,
    pub site_key: Option<String>,
    /// Path plus optional `?query`, exactly as received.
    pub url: String,
}

impl SiteRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_host(mut self, value: impl Into<String>) -> Self {
        self.host.push(value.into());
        self
    }

    /// Record a route parameter. Names other than `lang`, `siteKey` and
    /// `tenantKey` are ignored; `siteKey` takes precedence over `tenantKey`.
    pub fn with_param(mut self, name: &str, value: impl Into<String>) -> Self {
        match name {
            LANG_PARAM => self.lang = Some(value.into()),
            SITE_KEY_PARAM => self.site_key = Some(value.into()),
            LEGACY_SITE_KEY_PARAM if self.site_key.is_none() => self.site_key = Some(value.into()),
            _ => {}
        }
        self
    }
}
