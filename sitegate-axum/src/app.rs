use axum::handler::Handler;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use sitegate_core::SiteResolver;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middlewares::resolve_site;
use crate::SiteAxumState;

/// Router builder that knows which routes need a resolved site.
#[derive(Clone)]
pub struct AxumSiteApp {
    pub state: SiteAxumState,
    pub router: Router<()>,
}

impl AxumSiteApp {
    pub fn new(resolver: SiteResolver) -> Self {
        Self {
            state: SiteAxumState::new(resolver),
            router: Router::new(),
        }
    }

    /// Merge routes that run site resolution before their handlers.
    ///
    /// Parameters named `lang` and `siteKey` (or `tenantKey`) drive
    /// path-based resolution; routes without them still get domain
    /// resolution.
    pub fn site_routes(mut self, routes: Router<()>) -> Self {
        let routes = routes.route_layer(from_fn_with_state(self.state.clone(), resolve_site));
        self.router = self.router.merge(routes);
        self
    }

    /// Nest routes under `path` without site resolution.
    pub fn use_router(mut self, path: &str, router: Router<()>) -> Self {
        self.router = self.router.nest(path, router);
        self
    }

    /// Mount a plain GET handler without site resolution.
    pub fn service<H, T>(mut self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()> + Clone + Send + Sync + 'static,
        T: 'static,
    {
        self.router = self.router.route(path, get(handler));
        self
    }

    /// Final router with request ids and request tracing.
    pub fn into_router(self) -> Router {
        self.router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "listening");
        axum::serve(listener, self.into_router()).await?;
        Ok(())
    }
}
