//! State

use std::{fmt, sync::Arc};

use tollgate_app::context::AppContext;
use zeroize::Zeroizing;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) admin_secret: Zeroizing<String>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, admin_secret: impl Into<String>) -> Self {
        Self {
            app,
            admin_secret: Zeroizing::new(admin_secret.into()),
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, admin_secret: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(app, admin_secret))
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State").finish_non_exhaustive()
    }
}
