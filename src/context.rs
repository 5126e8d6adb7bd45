//! Application Context
//!
//! The stores and navigation, provided once by `App` via the Leptos Context
//! API and passed explicitly to every view that needs them.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::cart::CartStore;
use crate::flash::FlashChannel;
use crate::route::{self, Page};
use crate::session::SessionStore;

#[derive(Clone, Copy)]
pub struct AppContext {
    pub cart: CartStore,
    pub session: SessionStore,
    pub flash: FlashChannel,
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    api: StoredValue<ApiClient>,
}

impl AppContext {
    pub fn new(
        cart: CartStore,
        session: SessionStore,
        flash: FlashChannel,
        page: (ReadSignal<Page>, WriteSignal<Page>),
        api: ApiClient,
    ) -> Self {
        Self {
            cart,
            session,
            flash,
            page: page.0,
            set_page: page.1,
            api: StoredValue::new(api),
        }
    }

    /// Switch page and record it in browser history
    pub fn navigate(&self, page: Page) {
        route::push_history(&page);
        self.set_page.set(page);
    }

    /// Sync with the location after back/forward navigation
    pub fn sync_with_location(&self) {
        self.set_page.set(Page::current());
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
