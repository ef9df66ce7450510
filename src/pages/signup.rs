//! Signup Page
//!
//! Two tabs: create a team (manager) or join one with a Team ID (member).
//! Sign-up never signs in; success sends the user to the login page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::auth::{ManagerSignUp, MemberSignUp, MIN_PASSWORD_CHARS};
use crate::context::use_app_context;
use crate::guard::Route;
use crate::services;

#[derive(Clone, Copy, PartialEq, Eq)]
enum SignupTab {
    CreateTeam,
    JoinTeam,
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();

    let tab = RwSignal::new(SignupTab::CreateTeam);
    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let team_name = RwSignal::new(String::new());
    let team_id = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let submit = move |ev: web_sys::SubmitEvent| {
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
        let current_tab = tab.get_untracked();
        let name = full_name.get_untracked();
        let email = email.get_untracked();
        let password = password.get_untracked();
        let team_name = team_name.get_untracked();
        let team_id = team_id.get_untracked();
        let navigate = navigate.clone();

        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let (result, success_message) = match current_tab {
                SignupTab::CreateTeam => {
                    let form = ManagerSignUp { email, password, name, team_name };
                    (
                        gateway.sign_up_manager(&form).await,
                        "Team created. Please check your email to confirm, then login.",
                    )
                }
                SignupTab::JoinTeam => {
                    let form = MemberSignUp { email, password, name, team_id };
                    (
                        gateway.sign_up_member(&form).await,
                        "Joined team. Please check your email to confirm, then login.",
                    )
                }
            };
            match result {
                Ok(()) => {
                    ctx.notify(success_message);
                    navigate(Route::Login.path(), Default::default());
                }
                Err(e) => {
                    if error.try_set(Some(e.to_string())).is_some() {
                        log::debug!("[AUTH] Sign-up page closed before the response arrived");
                    }
                }
            }
            if loading.try_set(false).is_some() {
                log::debug!("[AUTH] Sign-up page closed before loading was reset");
            }
        });
    };

    let tab_class = move |which: SignupTab| {
        move || if tab.get() == which { "tab active" } else { "tab" }
    };

    view! {
        <div class="auth-page">
            <div class="tabs">
                <button
                    type="button"
                    class=tab_class(SignupTab::CreateTeam)
                    on:click=move |_| tab.set(SignupTab::CreateTeam)
                >
                    "Create Team"
                </button>
                <button
                    type="button"
                    class=tab_class(SignupTab::JoinTeam)
                    on:click=move |_| tab.set(SignupTab::JoinTeam)
                >
                    "Join Team"
                </button>
            </div>

            <form class="card auth-form" on:submit=submit>
                <label for="full-name">"Full Name"</label>
                <input
                    id="full-name"
                    placeholder="John Doe"
                    prop:value=move || full_name.get()
                    on:input=move |ev| full_name.set(event_target_value(&ev))
                    disabled=move || loading.get()
                />
                <label for="email">"Work Email"</label>
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
                    minlength=MIN_PASSWORD_CHARS.to_string()
                    placeholder="At least 6 characters"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                    disabled=move || loading.get()
                />

                <Show
                    when=move || tab.get() == SignupTab::CreateTeam
                    fallback=move || view! {
                        <label for="team-id">"Team ID"</label>
                        <input
                            id="team-id"
                            placeholder="Ask your manager for the Team ID"
                            prop:value=move || team_id.get()
                            on:input=move |ev| team_id.set(event_target_value(&ev))
                            disabled=move || loading.get()
                        />
                    }
                >
                    <label for="team-name">"Team Name"</label>
                    <input
                        id="team-name"
                        placeholder="Platform Team"
                        prop:value=move || team_name.get()
                        on:input=move |ev| team_name.set(event_target_value(&ev))
                        disabled=move || loading.get()
                    />
                </Show>

                {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}

                <button type="submit" class="primary-btn" disabled=move || loading.get()>
                    {move || match (loading.get(), tab.get()) {
                        (true, _) => "Please wait...",
                        (false, SignupTab::CreateTeam) => "Create Team",
                        (false, SignupTab::JoinTeam) => "Join Team",
                    }}
                </button>
            </form>

            <p class="auth-switch">
                "Already have an account? " <A href=Route::Login.path()>"Sign in"</A>
            </p>
        </div>
    }
}
