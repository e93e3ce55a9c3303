//! sitegate-axum: Axum adapter for sitegate.
//!
//! Runs site resolution as route middleware, exposes the result through the
//! [`CurrentSite`] extractor and renders resolution errors as JSON.

pub mod app;
pub mod extract;
pub mod middlewares;
pub mod params;
pub mod state;
mod error;
pub use error::SiteAxumError;
pub use state::SiteAxumState;

pub use app::AxumSiteApp;
pub use extract::CurrentSite;
pub use middlewares::resolve_site;
