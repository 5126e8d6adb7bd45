//! Cart Page
//!
//! Lists pending donations. Checkout needs a login and hands the user over
//! to the payment provider.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};

use crate::api;
use crate::cart::SyncState;
use crate::context::use_app_context;
use crate::flash::Severity;
use crate::route::{self, Page};

#[component]
pub fn CartPage() -> impl IntoView {
    let ctx = use_app_context();
    let (checking_out, set_checking_out) = signal(false);

    let checkout = move |_| {
        let Some(token) = ctx.session.token_untracked() else {
            ctx.flash.show("Please log in to check out", Severity::Info);
            ctx.navigate(Page::Login);
            return;
        };
        let items = ctx.cart.list_untracked();
        if items.is_empty() {
            return;
        }
        set_checking_out.set(true);
        let api = ctx.api();
        spawn_local(async move {
            match api::create_checkout(&api, Some(&token), &items).await {
                Ok(session) => {
                    info!("Redirecting to payment provider for {} items", items.len());
                    route::redirect_external(&session.url);
                }
                Err(e) => {
                    error!("Checkout failed: {}", e);
                    ctx.flash.error(format!("Checkout failed: {}", e));
                    set_checking_out.set(false);
                }
            }
        });
    };

    let sync_note = move || {
        let note = match ctx.cart.sync_state() {
            SyncState::Saving => "Saving to your account...",
            SyncState::Failed(_) => "Not saved to your account yet",
            SyncState::Idle | SyncState::Saved => return None,
        };
        Some(view! { <small class="text-muted d-block mb-2">{note}</small> })
    };

    view! {
        <div class="container mt-4">
            <h2 class="mb-4">"Your Donations"</h2>
            <Show
                when=move || !ctx.cart.is_empty()
                fallback=|| view! { <p class="text-center">"Your cart is empty."</p> }
            >
                <ul class="list-group">
                    <For
                        each=move || ctx.cart.list()
                        key=|item| item.id.clone()
                        children=move |item| {
                            let id = item.id.clone();
                            let amount = item
                                .donation_amount
                                .value()
                                .map(|v| format!("${:.2}", v))
                                .unwrap_or_else(|| "Invalid amount".to_string());
                            view! {
                                <li class="list-group-item d-flex justify-content-between align-items-center">
                                    <div>
                                        <h5>{item.campaign_title.clone()}</h5>
                                        <img
                                            src=item.image_url.clone()
                                            alt=item.campaign_title.clone()
                                            class="img-fluid rounded"
                                            style="max-width: 150px; max-height: 100px;"
                                        />
                                    </div>
                                    <div class="text-end">
                                        <p class="mb-2">{amount}</p>
                                        <button
                                            class="btn btn-danger btn-sm"
                                            on:click=move |_| {
                                                ctx.cart.remove(&id);
                                            }
                                        >
                                            "Remove"
                                        </button>
                                    </div>
                                </li>
                            }
                        }
                    />
                </ul>
                <div class="mt-3 text-end">
                    <h4>{move || format!("Total Donation: ${:.2}", ctx.cart.total())}</h4>
                    {sync_note}
                    <button
                        class="btn btn-donate"
                        disabled=move || checking_out.get()
                        on:click=checkout
                    >
                        {move || if checking_out.get() { "Redirecting..." } else { "Checkout" }}
                    </button>
                </div>
            </Show>
        </div>
    }
}
