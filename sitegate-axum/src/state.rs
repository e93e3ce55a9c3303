use std::sync::Arc;

use sitegate_core::SiteResolver;

#[derive(Clone)]
pub struct SiteAxumState {
    pub resolver: Arc<SiteResolver>,
}

impl SiteAxumState {
    pub fn new(resolver: SiteResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}
