//! Shared handler state.

use std::sync::Arc;

use stockroom_app::context::AppContext;

/// Injected into the depot once and read by every API handler.
#[derive(Clone)]
pub(crate) struct State {
    /// Product catalogue and order services
    pub(crate) app: AppContext,
}

impl State {
    /// Wrap the services for injection with `affix_state::inject`.
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
