//! Manager Dashboard
//!
//! Daily team summary for a selected date (today or earlier). Each date
//! change refetches; a response for a date no longer selected is dropped.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;

use crate::api::DATE_FORMAT;
use crate::components::SummaryCard;
use crate::context::use_app_context;
use crate::guard::Route;
use crate::markdown::render_summary;
use crate::models::SummaryResponse;
use crate::services;

/// What the summary area shows
#[derive(Debug, Clone, PartialEq)]
enum SummaryView {
    Loading,
    Ready(SummaryResponse),
    /// No summary yet, or the fetch failed
    Empty,
    /// Webhook not configured
    Unavailable(String),
}

impl From<SummaryResponse> for SummaryView {
    fn from(response: SummaryResponse) -> Self {
        if response.summary.trim().is_empty() {
            SummaryView::Empty
        } else {
            SummaryView::Ready(response)
        }
    }
}

/// Accept a picked date only if it parses and is not in the future
fn parse_picked_date(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok().filter(|d| *d <= today)
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let auth = ctx.auth_state();
    let Some(session) = auth.session().cloned().filter(|_| auth.is_manager()) else {
        return view! { <Redirect path=Route::Submit.path() /> }.into_any();
    };

    let today = services::today();
    let selected = RwSignal::new(today);
    let state = RwSignal::new(SummaryView::Loading);
    let team_id = session.team_id.clone();

    // Reload whenever the selected date changes
    Effect::new(move |_| {
        let date = selected.get();
        state.set(SummaryView::Loading);
        let team_id = team_id.clone();
        spawn_local(async move {
            let view = match services::summary_client() {
                Ok(client) => SummaryView::from(client.fetch(&team_id, date).await),
                Err(e) => {
                    log::error!("[SUMMARY] {}", e);
                    SummaryView::Unavailable(e.to_string())
                }
            };
            if selected.try_get_untracked() != Some(date) {
                log::debug!("[SUMMARY] Dropping stale response for {}", date);
                return;
            }
            if state.try_set(view).is_some() {
                log::debug!("[SUMMARY] Dashboard closed before the response for {} arrived", date);
            }
        });
    });

    view! {
        <div class="page dashboard-page">
            <div class="dashboard-header">
                <div>
                    <h1>"Manager Dashboard"</h1>
                    <p class="subtitle">"AI-generated daily performance summaries for your team."</p>
                    <p class="team-id">"Team ID: " <code>{session.team_id.clone()}</code></p>
                </div>
                <input
                    type="date"
                    class="date-picker"
                    max=today.format(DATE_FORMAT).to_string()
                    prop:value=move || selected.get().format(DATE_FORMAT).to_string()
                    on:change=move |ev| {
                        if let Some(date) = parse_picked_date(&event_target_value(&ev), today) {
                            selected.set(date);
                        }
                    }
                />
            </div>

            {move || match state.get() {
                SummaryView::Loading => view! { <div class="skeleton"></div> }.into_any(),
                SummaryView::Ready(response) => match response.team_summary() {
                    Some(summary) => view! { <SummaryCard summary=summary /> }.into_any(),
                    None => view! {
                        <div class="card summary-card">
                            <h2 class="card-title">
                                {format!("Team Summary - {}", selected.get_untracked().format("%b %-d, %Y"))}
                            </h2>
                            <div class="summary-body" inner_html=render_summary(&response.summary)></div>
                        </div>
                    }.into_any(),
                },
                SummaryView::Empty => view! {
                    <div class="empty-state">
                        <h3>"No summary generated"</h3>
                        <p>"Our AI hasn't processed the updates for this date yet, or no updates were submitted."</p>
                    </div>
                }.into_any(),
                SummaryView::Unavailable(message) => view! {
                    <div class="alert error">{message}</div>
                }.into_any(),
            }}
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_failed_fetch_renders_empty_state() {
        assert_eq!(SummaryView::from(SummaryResponse::failed()), SummaryView::Empty);
    }

    #[test]
    fn test_blank_summary_renders_empty_state() {
        let response = SummaryResponse { success: true, summary: "  \n".into(), ..Default::default() };
        assert_eq!(SummaryView::from(response), SummaryView::Empty);
    }

    #[test]
    fn test_summary_text_renders() {
        let response = SummaryResponse { success: true, summary: "Shipped.".into(), ..Default::default() };
        assert!(matches!(SummaryView::from(response), SummaryView::Ready(_)));
    }

    #[test]
    fn test_future_dates_are_ignored() {
        assert_eq!(parse_picked_date("2024-01-14", day(15)), Some(day(14)));
        assert_eq!(parse_picked_date("2024-01-15", day(15)), Some(day(15)));
        assert_eq!(parse_picked_date("2024-01-16", day(15)), None);
        assert_eq!(parse_picked_date("", day(15)), None);
    }
}
