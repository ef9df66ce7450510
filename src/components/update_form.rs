//! Update Form Component
//!
//! Work done / blockers / confidence inputs. Every control is disabled while
//! the flow is not in the editing phase.

use leptos::prelude::*;

use crate::models::Confidence;
use crate::submission::{SubmissionFlow, SubmitPhase};

#[component]
pub fn UpdateFormView(
    work_done: RwSignal<String>,
    blockers: RwSignal<String>,
    confidence: RwSignal<Confidence>,
    flow: RwSignal<SubmissionFlow>,
    #[prop(into)] on_submit: Callback<()>,
) -> impl IntoView {
    let disabled = move || flow.with(|f| f.controls_disabled());
    let in_flight = move || flow.with(|f| f.phase == SubmitPhase::InFlight);

    view! {
        <form
            class="update-form"
            on:submit=move |ev: web_sys::SubmitEvent| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <label for="work-done">
                "What did you work on today? " <span class="required">"*"</span>
            </label>
            <textarea
                id="work-done"
                placeholder="Describe what you accomplished today..."
                prop:value=move || work_done.get()
                on:input=move |ev| work_done.set(event_target_value(&ev))
                disabled=disabled
            ></textarea>
            {move || flow.with(|f| f.field_error.clone()).map(|e| view! { <p class="field-error">{e}</p> })}

            <label for="blockers">"Any blockers?"</label>
            <textarea
                id="blockers"
                placeholder="Describe any challenges or blockers (optional)..."
                prop:value=move || blockers.get()
                on:input=move |ev| blockers.set(event_target_value(&ev))
                disabled=disabled
            ></textarea>

            <label for="confidence">"Confidence Level"</label>
            <select
                id="confidence"
                prop:value=move || confidence.get().as_str()
                on:change=move |ev| confidence.set(Confidence::from_str(&event_target_value(&ev)))
                disabled=disabled
            >
                {Confidence::ALL.iter().map(|level| view! {
                    <option value=level.as_str()>{level.badge()}</option>
                }).collect_view()}
            </select>
            <p class="hint">"How confident are you about completing your current tasks?"</p>

            {move || flow.with(|f| f.failure.clone()).map(|e| view! { <p class="form-error">{e}</p> })}

            <button type="submit" class="primary-btn" disabled=disabled>
                {move || if in_flight() { "Submitting..." } else { "Submit Update" }}
            </button>
        </form>
    }
}
