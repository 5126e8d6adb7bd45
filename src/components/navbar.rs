//! Navbar Component
//!
//! Top navigation with active-page highlighting and a collapse toggle for
//! narrow screens.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::api;
use crate::context::use_app_context;
use crate::flash::Severity;
use crate::route::Page;

#[component]
fn NavLink(page: Page, label: &'static str) -> impl IntoView {
    let ctx = use_app_context();
    let href = page.path();
    let target = page.clone();
    let is_active = move || std::mem::discriminant(&ctx.page.get()) == std::mem::discriminant(&page);

    view! {
        <li class="nav-item">
            <a
                class=move || if is_active() { "nav-link active" } else { "nav-link" }
                href=href
                on:click=move |ev: web_sys::MouseEvent| {
                    ev.prevent_default();
                    ctx.navigate(target.clone());
                }
            >
                {label}
            </a>
        </li>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_app_context();
    let (expanded, set_expanded) = signal(false);

    let logout = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let token = ctx.session.token_untracked();
        ctx.session.logout();
        ctx.cart.forget_remote();
        info!("Logged out");
        let api = ctx.api();
        spawn_local(async move {
            if let Err(e) = api::logout(&api, token.as_deref()).await {
                warn!("Logout request failed: {}", e);
            }
        });
        ctx.flash.show("You have been logged out", Severity::Info);
        ctx.navigate(Page::Home);
    };

    view! {
        <nav class="navbar navbar-expand-lg navbar-light bg-light">
            <div class="container">
                <a
                    class="navbar-brand"
                    href="/"
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.prevent_default();
                        ctx.navigate(Page::Home);
                    }
                >
                    "MPWU Crowdfunding"
                </a>
                <button
                    class="navbar-toggler"
                    type="button"
                    aria-label="Toggle navigation"
                    on:click=move |_| set_expanded.update(|v| *v = !*v)
                >
                    <span class="navbar-toggler-icon"></span>
                </button>
                <div class=move || {
                    if expanded.get() { "collapse navbar-collapse show" } else { "collapse navbar-collapse" }
                }>
                    <ul class="navbar-nav ms-auto" on:click=move |_| set_expanded.set(false)>
                        <NavLink page=Page::Home label="About"/>
                        <NavLink page=Page::Campaigns label="Campaigns"/>
                        <NavLink page=Page::NewCampaign label="Start a Campaign"/>
                        {move || {
                            if ctx.session.is_authenticated() {
                                view! {
                                    <li class="nav-item">
                                        <a class="nav-link" href="/" on:click=logout>"Logout"</a>
                                    </li>
                                }
                                    .into_any()
                            } else {
                                view! {
                                    <NavLink page=Page::Register label="Register"/>
                                    <NavLink page=Page::Login label="Login"/>
                                }
                                    .into_any()
                            }
                        }}
                        <li class="nav-item">
                            <a
                                class=move || {
                                    if ctx.page.get() == Page::Cart { "nav-link active" } else { "nav-link" }
                                }
                                href="/cart"
                                on:click=move |ev: web_sys::MouseEvent| {
                                    ev.prevent_default();
                                    ctx.navigate(Page::Cart);
                                }
                            >
                                {move || format!("Cart ({})", ctx.cart.count())}
                            </a>
                        </li>
                    </ul>
                </div>
            </div>
        </nav>
    }
}
