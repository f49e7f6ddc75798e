use std::sync::Arc;

use crate::config::Config;
use crate::layout::PageSpec;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds only immutable data; the layout pipeline keeps no session state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Default page spec, validated at startup. Requests may override it.
    pub page_spec: Arc<PageSpec>,
}

impl AppState {
    pub fn new(config: Config, page_spec: PageSpec) -> Self {
        Self {
            config,
            page_spec: Arc::new(page_spec),
        }
    }
}
