mod app;
mod pages;
mod seed;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use sitegate_axum::AxumSiteApp;
use sitegate_core::{ConfigSnapshot, ResolverOptions, SiteResolver, TracingDiagnostics};

pub use app::load_config;
pub use seed::demo_directory;

pub fn build(config: &ConfigSnapshot) -> AxumSiteApp {
    let resolver = SiteResolver::new(
        Arc::new(seed::demo_directory()),
        ResolverOptions::from_snapshot(config),
        Arc::new(TracingDiagnostics),
    );

    let site_routes = Router::new()
        .route("/", get(pages::home))
        .route("/{lang}", get(pages::home))
        .route("/{lang}/{siteKey}", get(pages::home))
        .route("/{lang}/{siteKey}/", get(pages::home))
        .route("/{lang}/{siteKey}/contact", get(pages::contact))
        .route("/api/public/{lang}/{siteKey}/", get(pages::site_info))
        .route("/api/public/{lang}/{siteKey}/contact", get(pages::contact));

    AxumSiteApp::new(resolver)
        .site_routes(site_routes)
        .service("/health", || async { "ok" })
}
