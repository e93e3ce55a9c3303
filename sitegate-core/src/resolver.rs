//! Site resolution: turns `(Host, route params, URL)` into a [`Resolution`].
//!
//! Custom domains are tried first and are canonical by definition. When the
//! host is local, unbound, or the bound site is not published in the
//! requested language, resolution falls through to the `/{lang}/{siteKey}`
//! path, where aliases and explicit redirects are consolidated onto a single
//! canonical URL with a 301.

use std::sync::Arc;

use serde_json::json;

use crate::canonical::canonical_redirect_url;
use crate::config::ResolverOptions;
use crate::context::{SiteCtx, SiteRequest};
use crate::diagnostics::{Diagnostics, ResolveEvent, TracingDiagnostics};
use crate::errors::{SiteError, SiteResult};
use crate::host::{is_loopback_host, normalize_host};
use crate::lang::Lang;
use crate::lookup::SiteDirectory;

/// Outcome of resolving one request.
#[derive(Debug, PartialEq)]
pub enum Resolution {
    /// Attach the context and continue.
    Resolved(SiteCtx),
    /// Answer with `301 Moved Permanently` to this path (query included).
    RedirectTo(String),
    /// Answer with the error's status (400 or 404).
    Failed(SiteError),
    /// The route carries no site parameters and no domain matched.
    PassThrough,
}

pub struct SiteResolver {
    directory: Arc<dyn SiteDirectory>,
    options: ResolverOptions,
    diagnostics: Arc<dyn Diagnostics>,
}

impl SiteResolver {
    pub fn new(
        directory: Arc<dyn SiteDirectory>,
        options: ResolverOptions,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            directory,
            options,
            diagnostics,
        }
    }

    /// Default options, events go to `tracing`.
    pub fn with_tracing(directory: Arc<dyn SiteDirectory>) -> Self {
        Self::new(directory, ResolverOptions::default(), Arc::new(TracingDiagnostics))
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve a request.
    ///
    /// `Err` only carries directory failures; classified outcomes, including
    /// 400 and 404, come back as `Ok`.
    pub async fn resolve(&self, req: &SiteRequest) -> SiteResult<Resolution> {
        if self.options.domain_resolution {
            if let Some(host) = normalize_host(&req.host) {
                if is_loopback_host(&host) {
                    self.diagnostics.record(&ResolveEvent::LoopbackHost { host });
                } else if let Some(ctx) = self.resolve_by_domain(&host, req).await? {
                    return Ok(Resolution::Resolved(ctx));
                }
            }
        }

        self.resolve_by_path(req).await
    }

    async fn resolve_by_domain(&self, host: &str, req: &SiteRequest) -> SiteResult<Option<SiteCtx>> {
        let binding = self
            .directory
            .find_active_domain_binding(host)
            .await
            .map_err(|e| self.lookup_failed(req, e))?;

        let Some(binding) = binding.filter(|b| b.is_usable()) else {
            self.diagnostics.record(&ResolveEvent::DomainMiss {
                host: host.to_string(),
            });
            return Ok(None);
        };

        let lang = match req.lang.as_deref() {
            None => binding.default_lang,
            Some(raw) => match raw.parse::<Lang>() {
                Ok(lang) => lang,
                // No instance can exist for a language we do not serve.
                Err(_) => {
                    self.diagnostics.record(&ResolveEvent::InstanceMissing {
                        host: host.to_string(),
                        site_id: binding.site_id,
                        lang: raw.to_string(),
                    });
                    return Ok(None);
                }
            },
        };

        let has_instance = self
            .directory
            .site_instance_exists(&binding.site_id, lang)
            .await
            .map_err(|e| self.lookup_failed(req, e))?;

        if !has_instance {
            self.diagnostics.record(&ResolveEvent::InstanceMissing {
                host: host.to_string(),
                site_id: binding.site_id,
                lang: lang.to_string(),
            });
            return Ok(None);
        }

        self.diagnostics.record(&ResolveEvent::DomainMatched {
            host: host.to_string(),
            site_id: binding.site_id.clone(),
            lang,
        });

        Ok(Some(SiteCtx {
            site_id: binding.site_id,
            canonical_key: None,
            redirected: false,
            lang,
        }))
    }

    async fn resolve_by_path(&self, req: &SiteRequest) -> SiteResult<Resolution> {
        let (Some(raw_lang), Some(raw_key)) = (req.lang.as_deref(), req.site_key.as_deref()) else {
            return Ok(Resolution::PassThrough);
        };

        let lang = match raw_lang.parse::<Lang>() {
            Ok(lang) => lang,
            Err(err) => {
                self.diagnostics.record(&ResolveEvent::InvalidLang {
                    lang: raw_lang.to_string(),
                    path: req.url.clone(),
                });
                return Ok(Resolution::Failed(err));
            }
        };

        let slug = raw_key.trim();

        let key = self
            .directory
            .find_best_active_site_key(lang, slug)
            .await
            .map_err(|e| self.lookup_failed(req, e))?;

        let key = match key {
            Some(key) if key.is_active => key,
            _ => return self.resolve_legacy_slug(lang, slug, req).await,
        };

        // One hop only. A target carrying the requested slug would send the
        // client straight back here, so it is treated as canonical instead.
        if let Some(target) = key.active_redirect().filter(|t| t.slug != slug) {
            self.diagnostics.record(&ResolveEvent::RedirectFollowed {
                lang,
                from: slug.to_string(),
                to: target.slug.clone(),
            });
            return Ok(Resolution::RedirectTo(canonical_redirect_url(
                &req.url,
                slug,
                &target.slug,
                lang,
            )));
        }

        let mut canonical = key.slug.clone();
        if !key.is_primary {
            let primary = self
                .directory
                .find_primary_site_key(&key.site_id, lang)
                .await
                .map_err(|e| self.lookup_failed(req, e))?;

            if let Some(primary) = primary {
                if primary.slug != slug {
                    self.diagnostics.record(&ResolveEvent::AliasRedirect {
                        lang,
                        from: slug.to_string(),
                        to: primary.slug.clone(),
                    });
                    return Ok(Resolution::RedirectTo(canonical_redirect_url(
                        &req.url,
                        slug,
                        &primary.slug,
                        lang,
                    )));
                }
                canonical = primary.slug;
            }
        }

        let site = self
            .directory
            .find_active_site(&key.site_id)
            .await
            .map_err(|e| self.lookup_failed(req, e))?;

        if site.is_none() {
            self.diagnostics.record(&ResolveEvent::InactiveSite {
                site_id: key.site_id.clone(),
            });
            return Ok(Resolution::Failed(not_found(lang, slug)));
        }

        self.diagnostics.record(&ResolveEvent::PathMatched {
            lang,
            slug: canonical.clone(),
            site_id: key.site_id.clone(),
            redirected: !key.is_primary,
        });

        Ok(Resolution::Resolved(SiteCtx {
            site_id: key.site_id,
            canonical_key: Some(canonical),
            redirected: !key.is_primary,
            lang,
        }))
    }

    /// Sites predating site keys are addressed by `Site.slug`, which is its
    /// own canonical form.
    async fn resolve_legacy_slug(
        &self,
        lang: Lang,
        slug: &str,
        req: &SiteRequest,
    ) -> SiteResult<Resolution> {
        let site = self
            .directory
            .find_active_site_by_slug(slug)
            .await
            .map_err(|e| self.lookup_failed(req, e))?;

        match site {
            Some(site) if site.is_active => {
                self.diagnostics.record(&ResolveEvent::LegacySlug {
                    lang,
                    slug: slug.to_string(),
                    site_id: site.id.clone(),
                });
                Ok(Resolution::Resolved(SiteCtx {
                    site_id: site.id,
                    canonical_key: Some(slug.to_string()),
                    redirected: false,
                    lang,
                }))
            }
            _ => {
                self.diagnostics.record(&ResolveEvent::SlugNotFound {
                    lang,
                    slug: slug.to_string(),
                });
                Ok(Resolution::Failed(not_found(lang, slug)))
            }
        }
    }

    fn lookup_failed(&self, req: &SiteRequest, err: anyhow::Error) -> anyhow::Error {
        self.diagnostics.record(&ResolveEvent::LookupFailed {
            path: req.url.clone(),
            lang: req.lang.clone(),
            slug: req.site_key.clone(),
            error: format!("{err:#}"),
        });
        err.context(format!(
            "site lookup failed (lang={}, slug={}, path={})",
            req.lang.as_deref().unwrap_or("-"),
            req.site_key.as_deref().unwrap_or("-"),
            req.url
        ))
    }
}

fn not_found(lang: Lang, slug: &str) -> SiteError {
    SiteError::not_found(format!("Site not found: {lang}/{slug}"))
        .with_data(json!({ "lang": lang, "siteKey": slug }))
}
