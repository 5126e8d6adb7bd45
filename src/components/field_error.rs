//! Field Error Component

use leptos::prelude::*;

use crate::validation::FieldErrors;

/// Message for one form field, shown under its input
#[component]
pub fn FieldError(errors: ReadSignal<FieldErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors
            .with(|e| e.get(field).map(str::to_string))
            .map(|message| view! { <div class="text-danger small mt-1">{message}</div> })
    }
}
