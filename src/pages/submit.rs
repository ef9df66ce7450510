//! Submit Update Page
//!
//! Drives `SubmissionFlow`: validate locally, send once, then either show
//! the success state (terminal until reload) or return to editing.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;

use crate::components::UpdateFormView;
use crate::context::use_app_context;
use crate::guard::Route;
use crate::history::UpdateHistory;
use crate::models::Confidence;
use crate::services;
use crate::submission::{SubmissionFlow, SubmitPhase, UpdateForm};

#[component]
pub fn SubmitPage() -> impl IntoView {
    let ctx = use_app_context();
    let Some(session) = ctx.auth_state().session().cloned() else {
        return view! { <Redirect path=Route::Login.path() /> }.into_any();
    };

    let work_done = RwSignal::new(String::new());
    let blockers = RwSignal::new(String::new());
    let confidence = RwSignal::new(Confidence::default());
    let flow = RwSignal::new(SubmissionFlow::default());
    let sent_here_today = UpdateHistory::browser().sent_on(&session.member_id, services::today());

    let on_submit = move |_: ()| {
        let client = match services::submission_client() {
            Ok(client) => client,
            Err(e) => {
                log::error!("[SUBMIT] {}", e);
                flow.update(|f| f.failure = Some(e.to_string()));
                return;
            }
        };
        let form = UpdateForm {
            work_done: work_done.get_untracked(),
            blockers: blockers.get_untracked(),
            confidence: confidence.get_untracked(),
        };
        let Some(Ok(payload)) = flow.try_update(|f| f.begin(&form, &session)) else {
            return;
        };

        spawn_local(async move {
            let outcome = client.submit(&payload).await;
            if outcome.success() {
                UpdateHistory::browser().record(&payload, Utc::now(), services::today());
            }
            if flow.try_update(|f| f.finish(outcome)).is_none() {
                log::debug!("[SUBMIT] Page closed before the response arrived");
            }
        });
    };

    view! {
        <div class="page submit-page">
            <h1>"Daily Standup"</h1>
            <p class="subtitle">"Keep your team in the loop. Tell us what's happening."</p>

            <Show
                when=move || flow.with(|f| f.phase == SubmitPhase::Submitted)
                fallback=move || view! {
                    {sent_here_today.then(|| view! {
                        <p class="hint">"You already sent an update from this browser today."</p>
                    })}
                    <div class="card">
                        <h2 class="card-title">"What's your status today?"</h2>
                        <p class="card-description">"Briefly share your progress and any hurdles you're facing."</p>
                        <UpdateFormView
                            work_done=work_done
                            blockers=blockers
                            confidence=confidence
                            flow=flow
                            on_submit=on_submit.clone()
                        />
                    </div>
                }
            >
                <div class="alert success">
                    <h2>"Success!"</h2>
                    <p>"Your update for today has been recorded. Your manager will see it in the daily summary."</p>
                </div>
            </Show>
        </div>
    }
    .into_any()
}
