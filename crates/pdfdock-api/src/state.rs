//! Application state shared across handlers.

use std::sync::Arc;

use pdfdock_core::Config;

use crate::services::PdfLifecycleService;

#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<PdfLifecycleService>,
    pub config: Config,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
