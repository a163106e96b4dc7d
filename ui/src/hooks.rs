use dioxus::prelude::*;
use jubuddy::{ApiClient, AppStore, RequestTracker};

use crate::storage::BrowserStorage;

pub type Store = Signal<AppStore<BrowserStorage>>;

pub fn use_store() -> Store {
    use_context::<Store>()
}

pub fn use_client() -> ApiClient {
    use_context::<ApiClient>()
}

/// Tracker for a view's fetches. Every ticket it issued goes stale when the
/// component unmounts, so late responses never touch its signals.
pub fn use_request_tracker() -> RequestTracker {
    let tracker = use_hook(RequestTracker::new);
    use_drop({
        let tracker = tracker.clone();
        move || tracker.cancel_all()
    });
    tracker
}
