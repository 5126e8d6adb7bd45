//! Campaigns Page

use leptos::prelude::*;

use super::CampaignCard;
use crate::store::{use_app_store, CatalogStateStoreFields};

#[component]
pub fn CampaignsPage() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="container mt-5">
            <h1 class="text-center mb-4">"The Campaigns"</h1>
            {move || {
                store
                    .load_error()
                    .get()
                    .map(|e| {
                        view! {
                            <div class="alert alert-danger">
                                {format!("Could not load campaigns: {}", e)}
                            </div>
                        }
                    })
            }}
            <Show
                when=move || store.loaded().get()
                fallback=|| view! { <p class="text-center">"Loading campaigns..."</p> }
            >
                <Show
                    when=move || !store.campaigns().with(Vec::is_empty)
                    fallback=|| view! { <p class="text-center">"No campaigns yet."</p> }
                >
                    <div class="row">
                        <For
                            each=move || store.campaigns().get()
                            key=|c| (c.id, c.title.clone())
                            children=|campaign| {
                                view! {
                                    <div class="col-md-4 mb-4">
                                        <CampaignCard campaign=campaign/>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
