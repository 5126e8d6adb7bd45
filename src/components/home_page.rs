//! Home Page
//!
//! Hero banner and the most urgent active campaigns.

use leptos::prelude::*;

use super::CampaignCard;
use crate::config::FEATURED_COUNT;
use crate::context::use_app_context;
use crate::route::Page;
use crate::store::{featured_campaigns, use_app_store, CatalogStateStoreFields};

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let featured = move || store.campaigns().with(|all| featured_campaigns(all, FEATURED_COUNT));

    view! {
        <section class="hero text-center py-5">
            <div class="container">
                <h1 class="display-4">"Together We Can Make a Difference"</h1>
                <p class="lead">
                    "Support the causes that matter to you. Every donation brings a campaign closer to its goal."
                </p>
                <button class="btn btn-donate btn-lg" on:click=move |_| ctx.navigate(Page::Campaigns)>
                    "Our Campaigns"
                </button>
            </div>
        </section>
        <section class="container my-5">
            <h2 class="text-center mb-4">"Featured Campaigns"</h2>
            <Show
                when=move || store.loaded().get()
                fallback=|| view! { <p class="text-center">"Loading campaigns..."</p> }
            >
                <div class="row">
                    <For
                        each=featured
                        key=|c| (c.id, c.title.clone())
                        children=|campaign| {
                            view! {
                                <div class="col-md-3 mb-4">
                                    <CampaignCard campaign=campaign/>
                                </div>
                            }
                        }
                    />
                </div>
            </Show>
        </section>
    }
}
