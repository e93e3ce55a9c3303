//! sitegate-core: framework-agnostic site and language resolution.
//!
//! A request is resolved either by custom domain or by its
//! `/{lang}/{siteKey}/...` path into a [`SiteCtx`], a 301 onto the
//! canonical URL, or a classified failure.

pub mod canonical;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod errors;
pub mod host;
pub mod lang;
pub mod lookup;
pub mod memory;
pub mod records;
pub mod resolver;

pub use canonical::{build_canonical_url, canonical_redirect_url};
pub use config::{ConfigSnapshot, ResolverConfig, ResolverOptions};
pub use context::{SiteCtx, SiteRequest, LANG_PARAM, LEGACY_SITE_KEY_PARAM, SITE_KEY_PARAM};
pub use diagnostics::{Diagnostics, RecordingDiagnostics, ResolveEvent, TracingDiagnostics};
pub use errors::{ErrorKind, SiteError, SiteResult};
pub use host::{is_loopback_host, normalize_host};
pub use lang::Lang;
pub use lookup::{DomainBindingLookup, SiteDirectory, SiteInstanceLookup, SiteKeyLookup, SiteLookup};
pub use memory::{MemorySiteDirectory, SiteKeyRow};
pub use records::{DomainBinding, PrimaryKey, RedirectTarget, Site, SiteId, SiteKey, SiteKeyId};
pub use resolver::{Resolution, SiteResolver};
