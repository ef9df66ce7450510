//! Layout Component
//!
//! Header with role-aware navigation, the notice banner and the page body.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::context::use_app_context;
use crate::guard::Route;
use crate::services;

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();

    let logout = move |_| {
        match services::auth_gateway() {
            Ok(gateway) => spawn_local(gateway.sign_out()),
            Err(e) => {
                log::warn!("[APP] {}; clearing local session only", e);
                ctx.session_store().clear();
            }
        }
        ctx.session_changed();
        navigate(Route::Login.path(), Default::default());
    };

    view! {
        <header class="app-header">
            <A href=Route::Landing.path() attr:class="brand">"OpsPilot"</A>
            <nav class="nav-links">
                {move || {
                    let auth = ctx.auth_state();
                    match auth.session().cloned() {
                        None => view! {
                            <A href=Route::Login.path()>"Sign in"</A>
                            <A href=Route::Signup.path() attr:class="nav-cta">"Get started"</A>
                        }.into_any(),
                        Some(session) => view! {
                            <A href=Route::Submit.path()>"Submit Update"</A>
                            {auth.is_manager().then(|| view! {
                                <A href=Route::Dashboard.path()>"Dashboard"</A>
                            })}
                            <span class="nav-user" title=session.email.clone()>
                                {session.display_name().to_string()}
                            </span>
                        }.into_any(),
                    }
                }}
                <button
                    class="logout-btn"
                    class:hidden=move || ctx.auth_state().session().is_none()
                    on:click=logout
                >
                    "Logout"
                </button>
            </nav>
        </header>

        {move || ctx.notice.get().map(|message| view! {
            <div class="notice">
                <span>{message}</span>
                <button class="notice-dismiss" on:click=move |_| ctx.notice.set(None)>"×"</button>
            </div>
        })}

        <main class="main-content">{children()}</main>
    }
}
