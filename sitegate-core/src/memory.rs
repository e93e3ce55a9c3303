//! In-memory site directory for tests, demos and small deployments.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::bail;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::warn;

use crate::errors::SiteResult;
use crate::lang::Lang;
use crate::lookup::{DomainBindingLookup, SiteInstanceLookup, SiteKeyLookup, SiteLookup};
use crate::records::{DomainBinding, PrimaryKey, RedirectTarget, Site, SiteId, SiteKey, SiteKeyId};

/// A site key row as stored, with the redirect expressed by id.
#[derive(Debug, Clone)]
pub struct SiteKeyRow {
    pub id: SiteKeyId,
    pub site_id: SiteId,
    pub lang: Lang,
    pub slug: String,
    pub is_active: bool,
    pub is_primary: bool,
    pub redirect_to_id: Option<SiteKeyId>,
    pub created_at: DateTime<Utc>,
}

impl SiteKeyRow {
    /// Active, non-primary key created now.
    pub fn new(id: impl Into<String>, site_id: &SiteId, lang: Lang, slug: impl Into<String>) -> Self {
        Self {
            id: SiteKeyId(id.into()),
            site_id: site_id.clone(),
            lang,
            slug: slug.into(),
            is_active: true,
            is_primary: false,
            redirect_to_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn redirect_to(mut self, id: impl Into<String>) -> Self {
        self.redirect_to_id = Some(SiteKeyId(id.into()));
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }
}

#[derive(Debug, Clone)]
struct DomainRow {
    domain: String,
    site_id: SiteId,
    default_lang: Lang,
    is_active: bool,
}

/// Directory backed by plain vectors behind `RwLock`s.
///
/// Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemorySiteDirectory {
    sites: Arc<RwLock<Vec<Site>>>,
    domains: Arc<RwLock<Vec<DomainRow>>>,
    keys: Arc<RwLock<Vec<SiteKeyRow>>>,
    instances: Arc<RwLock<Vec<(SiteId, Lang)>>>,
    fail_lookups: Arc<AtomicBool>,
}

impl MemorySiteDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_site(&self, id: &SiteId, slug: impl Into<String>, is_active: bool) {
        self.sites.write().push(Site {
            id: id.clone(),
            slug: slug.into(),
            is_active,
        });
    }

    pub fn insert_domain(&self, domain: &str, site_id: &SiteId, default_lang: Lang, is_active: bool) {
        self.domains.write().push(DomainRow {
            domain: domain.to_lowercase(),
            site_id: site_id.clone(),
            default_lang,
            is_active,
        });
    }

    pub fn insert_key(&self, row: SiteKeyRow) {
        self.keys.write().push(row);
    }

    pub fn insert_instance(&self, site_id: &SiteId, lang: Lang) {
        self.instances.write().push((site_id.clone(), lang));
    }

    /// Make every lookup fail, as if the backing store were unreachable.
    pub fn set_fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> SiteResult<()> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            bail!("site directory unavailable");
        }
        Ok(())
    }

    fn site_is_active(&self, id: &SiteId) -> bool {
        self.sites.read().iter().any(|s| &s.id == id && s.is_active)
    }

    fn hydrate(&self, row: &SiteKeyRow, keys: &[SiteKeyRow]) -> SiteKey {
        let redirect_to = row.redirect_to_id.as_ref().and_then(|target_id| {
            keys.iter().find(|k| &k.id == target_id).map(|k| RedirectTarget {
                slug: k.slug.clone(),
                is_active: k.is_active,
            })
        });

        SiteKey {
            id: row.id.clone(),
            site_id: row.site_id.clone(),
            lang: row.lang,
            slug: row.slug.clone(),
            is_active: row.is_active,
            is_primary: row.is_primary,
            redirect_to,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl DomainBindingLookup for MemorySiteDirectory {
    async fn find_active_domain_binding(&self, host: &str) -> SiteResult<Option<DomainBinding>> {
        self.check_available()?;

        let row = self
            .domains
            .read()
            .iter()
            .find(|d| d.domain == host && d.is_active)
            .cloned();

        Ok(row.map(|d| DomainBinding {
            site_active: self.site_is_active(&d.site_id),
            domain: d.domain,
            site_id: d.site_id,
            default_lang: d.default_lang,
            is_active: d.is_active,
        }))
    }
}

#[async_trait]
impl SiteKeyLookup for MemorySiteDirectory {
    async fn find_best_active_site_key(&self, lang: Lang, slug: &str) -> SiteResult<Option<SiteKey>> {
        self.check_available()?;

        let keys = self.keys.read();
        let mut candidates: Vec<&SiteKeyRow> = keys
            .iter()
            .filter(|k| k.lang == lang && k.slug == slug && k.is_active)
            .collect();

        // is_primary desc, created_at asc
        candidates.sort_by(|a, b| {
            b.is_primary
                .cmp(&a.is_primary)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });

        if candidates.len() > 1 {
            warn!(
                lang = %lang,
                slug = slug,
                candidates = candidates.len(),
                winner = %candidates[0].id.0,
                "duplicate active site keys, tie-break applied"
            );
        }

        Ok(candidates.first().map(|row| self.hydrate(row, &keys)))
    }

    async fn find_primary_site_key(
        &self,
        site_id: &SiteId,
        lang: Lang,
    ) -> SiteResult<Option<PrimaryKey>> {
        self.check_available()?;

        let keys = self.keys.read();
        let mut primaries: Vec<&SiteKeyRow> = keys
            .iter()
            .filter(|k| &k.site_id == site_id && k.lang == lang && k.is_primary && k.is_active)
            .collect();
        primaries.sort_by_key(|k| k.created_at);

        if primaries.len() > 1 {
            warn!(
                site_id = %site_id,
                lang = %lang,
                primaries = primaries.len(),
                "multiple primary site keys, using the oldest"
            );
        }

        Ok(primaries.first().map(|k| PrimaryKey { slug: k.slug.clone() }))
    }
}

#[async_trait]
impl SiteLookup for MemorySiteDirectory {
    async fn find_active_site(&self, id: &SiteId) -> SiteResult<Option<Site>> {
        self.check_available()?;
        Ok(self
            .sites
            .read()
            .iter()
            .find(|s| &s.id == id && s.is_active)
            .cloned())
    }

    async fn find_active_site_by_slug(&self, slug: &str) -> SiteResult<Option<Site>> {
        self.check_available()?;
        Ok(self
            .sites
            .read()
            .iter()
            .find(|s| s.slug == slug && s.is_active)
            .cloned())
    }
}

#[async_trait]
impl SiteInstanceLookup for MemorySiteDirectory {
    async fn site_instance_exists(&self, site_id: &SiteId, lang: Lang) -> SiteResult<bool> {
        self.check_available()?;
        Ok(self
            .instances
            .read()
            .iter()
            .any(|(id, l)| id == site_id && *l == lang))
    }
}
