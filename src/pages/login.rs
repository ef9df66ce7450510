//! Login Page
//!
//! Email/password sign-in. The control stays disabled while the request is
//! in flight; results for a page that was left are dropped.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::context::use_app_context;
use crate::guard::Route;
use crate::services;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let sign_in = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let gateway = match services::auth_gateway() {
            Ok(gateway) => gateway,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let email = email.get_untracked();
        let password = password.get_untracked();
        let navigate = navigate.clone();

        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match gateway.sign_in(&email, &password).await {
                Ok(session) => {
                    ctx.notify(format!("Welcome back, {}!", session.display_name()));
                    ctx.session_changed();
                    navigate(Route::Submit.path(), Default::default());
                }
                Err(e) => {
                    let dropped = error.try_set(Some(e.to_string())).is_some()
                        | loading.try_set(false).is_some();
                    if dropped {
                        log::debug!("[AUTH] Login page closed before the response arrived");
                    }
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <h1>"Welcome back"</h1>
            <p class="subtitle">"Sign in to manage your daily operations"</p>

            <form class="card auth-form" on:submit=sign_in>
                <label for="email">"Email"</label>
                <input
                    id="email"
                    type="email"
                    placeholder="name@company.com"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                    disabled=move || loading.get()
                />
                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                    disabled=move || loading.get()
                />

                {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}

                <button type="submit" class="primary-btn" disabled=move || loading.get()>
                    {move || if loading.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>

            <p class="auth-switch">
                "Don't have an account? " <A href=Route::Signup.path()>"Sign up"</A>
            </p>
        </div>
    }
}
