//! Crowdfunding Frontend App
//!
//! Builds the stores, provides them as context and switches between pages.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info, warn};
use reactive_stores::Store;

use crate::api::{self, ApiClient};
use crate::cart::CartStore;
use crate::components::{
    CampaignForm, CampaignsPage, CartPage, FlashBanner, HomePage, LoginPage, Navbar, PaymentSuccess,
    RegisterPage,
};
use crate::config::Config;
use crate::context::AppContext;
use crate::flash::{FlashChannel, Severity};
use crate::keymap;
use crate::route::Page;
use crate::session::SessionStore;
use crate::storage::{BrowserStorage, SharedStorage};
use crate::store::{store_set_campaigns, store_set_load_error, CatalogState};

#[component]
pub fn App(config: Config) -> impl IntoView {
    if let Err(e) = keymap::check_line_item_map() {
        error!("Line item key mapping is inconsistent: {}", e);
    }

    // Stores
    let storage: SharedStorage = Arc::new(BrowserStorage);
    let api = ApiClient::new(config.api_url.clone());
    let flash = FlashChannel::new(config.flash_duration);
    let session = SessionStore::new(storage.clone());
    let cart = CartStore::new(storage, api.clone(), session, flash);
    let (page, set_page) = signal(Page::current());

    let ctx = AppContext::new(cart, session, flash, (page, set_page), api);
    provide_context(ctx);
    let store = Store::new(CatalogState::default());
    provide_context(store);

    // Back/forward buttons
    let _ = window_event_listener(leptos::ev::popstate, move |_| ctx.sync_with_location());

    // Load campaigns on mount
    Effect::new(move |_| {
        let api = ctx.api();
        spawn_local(async move {
            match api::list_campaigns(&api).await {
                Ok(loaded) => {
                    info!("Loaded {} campaigns", loaded.len());
                    store_set_campaigns(&store, loaded);
                }
                Err(e) => {
                    error!("Loading campaigns failed: {}", e);
                    store_set_load_error(&store, e.to_string());
                }
            }
        });
    });

    // Check a token left over from an earlier visit
    Effect::new(move |_| {
        let Some(token) = session.token_untracked() else {
            return;
        };
        let api = ctx.api();
        spawn_local(async move {
            let expired = match api::auth_status(&api, Some(&token)).await {
                Ok(status) => !status.authenticated,
                Err(e) if e.is_unauthorized() => true,
                Err(e) => {
                    warn!("Could not verify session: {}", e);
                    false
                }
            };
            if expired {
                info!("Stored session is no longer valid");
                session.logout();
                cart.forget_remote();
                flash.show("Your session has expired, please log in again", Severity::Info);
            } else {
                debug!("Stored session is valid");
                cart.sync_after_login();
            }
        });
    });

    view! {
        <Navbar/>
        <FlashBanner/>
        <main class="app-main">
            {move || match page.get() {
                Page::Home => view! { <HomePage/> }.into_any(),
                Page::Campaigns => view! { <CampaignsPage/> }.into_any(),
                Page::NewCampaign => view! { <CampaignForm/> }.into_any(),
                Page::Register => view! { <RegisterPage/> }.into_any(),
                Page::Login => view! { <LoginPage/> }.into_any(),
                Page::Cart => view! { <CartPage/> }.into_any(),
                Page::PaymentSuccess { order_id } => view! { <PaymentSuccess order_id=order_id/> }.into_any(),
            }}
        </main>
        <footer class="site-footer text-center py-4">
            <div class="container">
                <p class="mb-0">"© 2024 MPWU Crowdfunding | All rights reserved."</p>
            </div>
        </footer>
    }
}
