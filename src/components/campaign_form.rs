//! Campaign Form Component
//!
//! Creates a campaign. Inputs are kept as typed and only converted when the
//! form is submitted.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};

use super::FieldError;
use crate::api;
use crate::context::use_app_context;
use crate::models::{CampaignStatus, UrgencyLevel};
use crate::route::Page;
use crate::store::{store_add_campaign, store_set_campaigns, store_set_load_error, use_app_store};
use crate::validation::{validate_campaign, CampaignDraft, FieldErrors};

#[component]
pub fn CampaignForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let draft = RwSignal::new(CampaignDraft::default());
    let (errors, set_errors) = signal(FieldErrors::new());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let campaign = match draft.with_untracked(validate_campaign) {
            Ok(campaign) => campaign,
            Err(field_errors) => {
                set_errors.set(field_errors);
                return;
            }
        };
        set_errors.set(FieldErrors::new());
        set_submitting.set(true);

        let token = ctx.session.token_untracked();
        let api = ctx.api();
        spawn_local(async move {
            match api::create_campaign(&api, token.as_deref(), &campaign).await {
                Ok(Some(created)) => {
                    info!("Created campaign {} ({})", created.id, created.title);
                    store_add_campaign(&store, created);
                    ctx.flash.success("Campaign created");
                    ctx.navigate(Page::Campaigns);
                }
                Ok(None) => {
                    info!("Campaign created, reloading the catalog");
                    match api::list_campaigns(&api).await {
                        Ok(loaded) => store_set_campaigns(&store, loaded),
                        Err(e) => store_set_load_error(&store, e.to_string()),
                    }
                    ctx.flash.success("Campaign created");
                    ctx.navigate(Page::Campaigns);
                }
                Err(e) => {
                    error!("Campaign creation failed: {}", e);
                    ctx.flash.error(format!("Could not create campaign: {}", e));
                    set_submitting.set(false);
                }
            }
        });
    };

    let input = move |id: &'static str,
                      label: &'static str,
                      kind: &'static str,
                      read: fn(&CampaignDraft) -> &str,
                      write: fn(&mut CampaignDraft, String)| {
        view! {
            <div class="mb-3">
                <label class="form-label" for=id>{label}</label>
                <input
                    id=id
                    type=kind
                    class="form-control"
                    prop:value=move || draft.with(|d| read(d).to_string())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| write(d, value));
                    }
                />
                <FieldError errors=errors field=id/>
            </div>
        }
    };

    view! {
        <div class="container mt-5" style="max-width: 720px;">
            <h2 class="mb-4">"Start a Campaign"</h2>
            <form on:submit=on_submit novalidate>
                {input("title", "Title", "text", |d| d.title.as_str(), |d, v| d.title = v)}
                <div class="mb-3">
                    <label class="form-label" for="description">"Description"</label>
                    <textarea
                        id="description"
                        class="form-control"
                        rows="4"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.description = value);
                        }
                    ></textarea>
                    <FieldError errors=errors field="description"/>
                </div>
                <div class="mb-3">
                    <label class="form-label" for="image_url">"Image URLs (comma or line separated)"</label>
                    <textarea
                        id="image_url"
                        class="form-control"
                        rows="2"
                        prop:value=move || draft.with(|d| d.image_urls.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.image_urls = value);
                        }
                    ></textarea>
                    <FieldError errors=errors field="image_url"/>
                </div>
                {input(
                    "target_amount",
                    "Target Amount",
                    "number",
                    |d| d.target_amount.as_str(),
                    |d, v| d.target_amount = v,
                )}
                <div class="row">
                    <div class="col">
                        {input("start_date", "Start Date", "date", |d| d.start_date.as_str(), |d, v| d.start_date = v)}
                    </div>
                    <div class="col">
                        {input("end_date", "End Date", "date", |d| d.end_date.as_str(), |d, v| d.end_date = v)}
                    </div>
                </div>
                <div class="row">
                    <div class="col mb-3">
                        <label class="form-label" for="campaign_status">"Status"</label>
                        <select
                            id="campaign_status"
                            class="form-select"
                            prop:value=move || draft.with(|d| d.status.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.status = value);
                            }
                        >
                            {CampaignStatus::ALL
                                .iter()
                                .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                .collect_view()}
                        </select>
                        <FieldError errors=errors field="campaign_status"/>
                    </div>
                    <div class="col mb-3">
                        <label class="form-label" for="urgency_level">"Urgency"</label>
                        <select
                            id="urgency_level"
                            class="form-select"
                            prop:value=move || draft.with(|d| d.urgency_level.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.urgency_level = value);
                            }
                        >
                            {UrgencyLevel::ALL
                                .iter()
                                .map(|u| view! { <option value=u.as_str()>{u.label()}</option> })
                                .collect_view()}
                        </select>
                        <FieldError errors=errors field="urgency_level"/>
                    </div>
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Creating..." } else { "Create Campaign" }}
                </button>
            </form>
        </div>
    }
}
