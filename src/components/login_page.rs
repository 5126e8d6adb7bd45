//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use super::FieldError;
use crate::api;
use crate::context::use_app_context;
use crate::models::Credentials;
use crate::route::Page;
use crate::validation::{validate_login, FieldErrors};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (errors, set_errors) = signal(FieldErrors::new());
    let (submit_error, set_submit_error) = signal(None::<String>);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if let Err(field_errors) = validate_login(&credentials) {
            set_errors.set(field_errors);
            return;
        }
        set_errors.set(FieldErrors::new());
        set_submit_error.set(None);
        set_submitting.set(true);

        let api = ctx.api();
        spawn_local(async move {
            match api::login(&api, &credentials).await {
                Ok(token) if ctx.session.login(&token).is_some() => {
                    info!(
                        "Logged in as {} (user id {})",
                        credentials.email,
                        ctx.session.user_id().unwrap_or_else(|| "unknown".to_string())
                    );
                    ctx.cart.sync_after_login();
                    ctx.flash.success("Login successful!");
                    ctx.navigate(Page::Home);
                }
                Ok(_) => {
                    warn!("Login response carried an empty token");
                    set_submit_error.set(Some("Login failed. Please try again.".to_string()));
                    set_submitting.set(false);
                }
                Err(e) => {
                    warn!("Login failed: {}", e);
                    set_submit_error.set(Some(e.to_string()));
                    set_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="container mt-5" style="max-width: 480px;">
            <h2 class="mb-4">"Login"</h2>
            {move || submit_error.get().map(|e| view! { <div class="alert alert-danger">{e}</div> })}
            <form on:submit=on_submit novalidate>
                <div class="mb-3">
                    <label class="form-label" for="email">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        class="form-control"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field="email"/>
                </div>
                <div class="mb-3">
                    <label class="form-label" for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        class="form-control"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field="password"/>
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
        </div>
    }
}
