//! Payment Success Page
//!
//! Landing page after the payment provider redirects back. A confirmed
//! order empties the cart.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::api;
use crate::context::use_app_context;
use crate::models::Order;
use crate::route::Page;

#[derive(Debug, Clone, PartialEq)]
enum OrderState {
    Loading,
    Confirmed(Order),
    Failed(String),
}

#[component]
pub fn PaymentSuccess(order_id: Option<String>) -> impl IntoView {
    let ctx = use_app_context();
    let (state, set_state) = signal(OrderState::Loading);

    match order_id {
        None => set_state.set(OrderState::Failed("No order reference was given.".to_string())),
        Some(order_id) => {
            let api = ctx.api();
            spawn_local(async move {
                match api::get_order(&api, &order_id).await {
                    Ok(order) => {
                        info!("Order {} confirmed, clearing cart", order.id);
                        ctx.cart.clear();
                        let _ = set_state.try_set(OrderState::Confirmed(order));
                    }
                    Err(e) => {
                        warn!("Could not load order {}: {}", order_id, e);
                        let _ = set_state.try_set(OrderState::Failed(e.to_string()));
                    }
                }
            });
        }
    }

    view! {
        <div class="container mt-5 text-center">
            {move || match state.get() {
                OrderState::Loading => view! { <p>"Confirming your payment..."</p> }.into_any(),
                OrderState::Confirmed(order) => {
                    let progress = order.campaign_progress.clamp(0.0, 100.0);
                    view! {
                        <h1 class="mb-3">"Thank you for your donation!"</h1>
                        <p>{format!("Order reference: {}", order.id)}</p>
                        <p>{format!("The campaign is now {:.0}% funded.", progress)}</p>
                        <div class="progress mx-auto mb-4" style="max-width: 480px;">
                            <div class="progress-bar" role="progressbar" style=format!("width: {:.0}%", progress)></div>
                        </div>
                    }
                        .into_any()
                }
                OrderState::Failed(e) => {
                    view! {
                        <h1 class="mb-3">"Payment status unknown"</h1>
                        <p class="text-danger">{format!("We could not confirm your order: {}", e)}</p>
                    }
                        .into_any()
                }
            }}
            <button class="btn btn-donate" on:click=move |_| ctx.navigate(Page::Campaigns)>
                "Back to Campaigns"
            </button>
        </div>
    }
}
