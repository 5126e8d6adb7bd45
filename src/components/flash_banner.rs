//! Flash Banner Component

use leptos::prelude::*;

use crate::context::use_app_context;

/// Renders the single flash slot, if occupied
#[component]
pub fn FlashBanner() -> impl IntoView {
    let ctx = use_app_context();

    move || {
        ctx.flash.current().map(|message| {
            view! {
                <div class=message.severity.alert_class() role="alert">
                    {message.text}
                    <button
                        type="button"
                        class="btn-close"
                        aria-label="Close"
                        on:click=move |_| ctx.flash.clear()
                    ></button>
                </div>
            }
        })
    }
}
