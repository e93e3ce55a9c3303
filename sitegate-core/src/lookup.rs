//! Collaborator interfaces onto the site directory.
//!
//! The resolver never talks to storage directly. Any `Err` returned here is
//! treated as an unclassified lookup failure and propagated as-is; retries
//! and timeouts belong to the implementation, not to the resolver.

use async_trait::async_trait;

use crate::errors::SiteResult;
use crate::lang::Lang;
use crate::records::{DomainBinding, PrimaryKey, Site, SiteId, SiteKey};

#[async_trait]
pub trait DomainBindingLookup: Send + Sync {
    /// Binding for a normalized host, together with its site's active flag.
    async fn find_active_domain_binding(&self, host: &str) -> SiteResult<Option<DomainBinding>>;
}

#[async_trait]
pub trait SiteKeyLookup: Send + Sync {
    /// Best active key for `(lang, slug)`.
    ///
    /// When several rows qualify the primary one wins, then the oldest by
    /// `created_at`. Only the winner is returned.
    async fn find_best_active_site_key(&self, lang: Lang, slug: &str) -> SiteResult<Option<SiteKey>>;

    /// Primary key of a site in one language.
    async fn find_primary_site_key(&self, site_id: &SiteId, lang: Lang)
        -> SiteResult<Option<PrimaryKey>>;
}

#[async_trait]
pub trait SiteLookup: Send + Sync {
    async fn find_active_site(&self, id: &SiteId) -> SiteResult<Option<Site>>;

    /// Legacy fallback by `Site.slug`.
    async fn find_active_site_by_slug(&self, slug: &str) -> SiteResult<Option<Site>>;
}

#[async_trait]
pub trait SiteInstanceLookup: Send + Sync {
    async fn site_instance_exists(&self, site_id: &SiteId, lang: Lang) -> SiteResult<bool>;
}

/// Everything the resolver needs from the directory.
pub trait SiteDirectory: DomainBindingLookup + SiteKeyLookup + SiteLookup + SiteInstanceLookup {}

impl<T> SiteDirectory for T where
    T: DomainBindingLookup + SiteKeyLookup + SiteLookup + SiteInstanceLookup
{
}
