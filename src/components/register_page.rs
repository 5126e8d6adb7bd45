//! Register Page
//!
//! Account sign-up with salutation, marketing preferences and country.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use super::FieldError;
use crate::api;
use crate::context::use_app_context;
use crate::models::Registration;
use crate::route::Page;
use crate::validation::{validate_registration, FieldErrors, MARKETING_PREFERENCES, SALUTATIONS};

const COUNTRIES: &[&str] = &[
    "Malaysia",
    "Singapore",
    "Indonesia",
    "Brunei",
    "Thailand",
    "Philippines",
    "Other",
];

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(Registration::default());
    let (errors, set_errors) = signal(FieldErrors::new());
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let registration = form.get_untracked();
        if let Err(field_errors) = validate_registration(&registration) {
            set_errors.set(field_errors);
            return;
        }
        set_errors.set(FieldErrors::new());
        set_submitting.set(true);

        let api = ctx.api();
        spawn_local(async move {
            match api::register(&api, &registration).await {
                Ok(()) => {
                    info!("Registered {}", registration.email);
                    ctx.flash.success("Registration successful!");
                    ctx.navigate(Page::Login);
                }
                Err(e) => {
                    warn!("Registration failed: {}", e);
                    ctx.flash.error("Registration failed. Please try again.");
                    set_submitting.set(false);
                }
            }
        });
    };

    let text_input = move |id: &'static str,
                           label: &'static str,
                           kind: &'static str,
                           read: fn(&Registration) -> &str,
                           write: fn(&mut Registration, String)| {
        view! {
            <div class="mb-3">
                <label class="form-label" for=id>{label}</label>
                <input
                    id=id
                    type=kind
                    class="form-control"
                    prop:value=move || form.with(|f| read(f).to_string())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| write(f, value));
                    }
                />
                <FieldError errors=errors field=id/>
            </div>
        }
    };

    view! {
        <div class="container mt-5" style="max-width: 560px;">
            <h2 class="mb-4">"Register"</h2>
            <form on:submit=on_submit novalidate>
                <div class="mb-3">
                    <label class="form-label d-block">"Salutation"</label>
                    {SALUTATIONS
                        .iter()
                        .map(|&salutation| {
                            view! {
                                <div class="form-check form-check-inline">
                                    <input
                                        class="form-check-input"
                                        type="radio"
                                        name="salutation"
                                        id=format!("salutation-{}", salutation)
                                        prop:checked=move || form.with(|f| f.salutation == salutation)
                                        on:change=move |_| form.update(|f| f.salutation = salutation.to_string())
                                    />
                                    <label class="form-check-label" for=format!("salutation-{}", salutation)>
                                        {salutation}
                                    </label>
                                </div>
                            }
                        })
                        .collect_view()}
                    <FieldError errors=errors field="salutation"/>
                </div>
                {text_input("name", "Name", "text", |f| f.name.as_str(), |f, v| f.name = v)}
                {text_input("email", "Email", "email", |f| f.email.as_str(), |f, v| f.email = v)}
                {text_input("password", "Password", "password", |f| f.password.as_str(), |f, v| f.password = v)}
                {text_input(
                    "confirmPassword",
                    "Confirm Password",
                    "password",
                    |f| f.confirm_password.as_str(),
                    |f, v| f.confirm_password = v,
                )}
                <div class="mb-3">
                    <label class="form-label d-block">"Marketing Preferences"</label>
                    {MARKETING_PREFERENCES
                        .iter()
                        .map(|&preference| {
                            view! {
                                <div class="form-check form-check-inline">
                                    <input
                                        class="form-check-input"
                                        type="checkbox"
                                        id=format!("pref-{}", preference)
                                        prop:checked=move || {
                                            form.with(|f| f.marketing_preferences.iter().any(|p| p == preference))
                                        }
                                        on:change=move |ev| {
                                            let checked = event_target_checked(&ev);
                                            form.update(|f| {
                                                f.marketing_preferences.retain(|p| p != preference);
                                                if checked {
                                                    f.marketing_preferences.push(preference.to_string());
                                                }
                                            });
                                        }
                                    />
                                    <label class="form-check-label" for=format!("pref-{}", preference)>
                                        {preference}
                                    </label>
                                </div>
                            }
                        })
                        .collect_view()}
                    <FieldError errors=errors field="marketingPreferences"/>
                </div>
                <div class="mb-3">
                    <label class="form-label" for="country">"Country"</label>
                    <select
                        id="country"
                        class="form-select"
                        prop:value=move || form.with(|f| f.country.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.country = value);
                        }
                    >
                        {COUNTRIES
                            .iter()
                            .map(|&country| view! { <option value=country>{country}</option> })
                            .collect_view()}
                    </select>
                    <FieldError errors=errors field="country"/>
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Registering..." } else { "Register" }}
                </button>
            </form>
        </div>
    }
}
