//! Campaign Card Component
//!
//! One campaign with preset donation amounts. Donating adds a line item to
//! the cart and moves to the cart page.

use leptos::prelude::*;
use log::warn;

use crate::cart::Donation;
use crate::config::{DEFAULT_DONATION, DONATION_PRESETS};
use crate::context::use_app_context;
use crate::models::{Campaign, UrgencyLevel};
use crate::route::Page;

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";
const DEFAULT_DESCRIPTION: &str = "This campaign aims to raise funds for various causes.";

fn urgency_badge(level: UrgencyLevel) -> &'static str {
    match level {
        UrgencyLevel::High => "badge bg-danger",
        UrgencyLevel::Medium => "badge bg-warning text-dark",
        UrgencyLevel::Low => "badge bg-secondary",
    }
}

#[component]
pub fn CampaignCard(campaign: Campaign) -> impl IntoView {
    let ctx = use_app_context();
    let (selected, set_selected) = signal(DEFAULT_DONATION);

    let progress = campaign.progress_percent();
    let image = campaign.cover_image().unwrap_or(PLACEHOLDER_IMAGE).to_string();
    let description = if campaign.description.trim().is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        campaign.description.clone()
    };
    let raised = format!("${:.2} raised of ${:.2}", campaign.current_amount, campaign.target_amount);

    let campaign_id = campaign.id;
    let cart_title = campaign.title.clone();
    let cart_image = image.clone();
    let donate = move |_| {
        let donation = Donation {
            campaign_id,
            campaign_title: cart_title.clone(),
            image_url: cart_image.clone(),
            amount: f64::from(selected.get_untracked()),
            pledge_id: None,
        };
        match ctx.cart.add(donation) {
            Ok(_) => {
                ctx.flash.success("Donation added to cart");
                ctx.navigate(Page::Cart);
            }
            Err(e) => {
                warn!("Could not add donation for campaign {}: {}", campaign_id, e);
                ctx.flash.error(e.to_string());
            }
        }
    };

    view! {
        <div class="card h-100 campaign-card">
            <img src=image class="card-img-top" alt=campaign.title.clone()/>
            <div class="card-body d-flex flex-column">
                <div class="d-flex justify-content-between align-items-start">
                    <h5 class="card-title">{campaign.title.clone()}</h5>
                    <span class=urgency_badge(campaign.urgency_level)>
                        {campaign.urgency_level.label()}
                    </span>
                </div>
                <p class="card-text">{description}</p>
                <div class="progress mb-2">
                    <div
                        class="progress-bar"
                        role="progressbar"
                        style=format!("width: {:.0}%", progress)
                        aria-valuenow=format!("{:.0}", progress)
                        aria-valuemin="0"
                        aria-valuemax="100"
                    >
                        {format!("{:.0}%", progress)}
                    </div>
                </div>
                <small class="text-muted mb-3">{raised}</small>
                <div class="btn-group mb-3" role="group" aria-label="Donation amount">
                    {DONATION_PRESETS
                        .iter()
                        .map(|&amount| {
                            view! {
                                <button
                                    type="button"
                                    class=move || {
                                        if selected.get() == amount {
                                            "btn btn-outline-primary active"
                                        } else {
                                            "btn btn-outline-primary"
                                        }
                                    }
                                    on:click=move |_| set_selected.set(amount)
                                >
                                    {format!("${}", amount)}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <button type="button" class="btn btn-donate mt-auto" on:click=donate>
                    {move || format!("Donate ${}", selected.get())}
                </button>
            </div>
        </div>
    }
}
