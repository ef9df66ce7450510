//! Summary Card Component
//!
//! Team summary header (team, confidence, date, update count) above the
//! rendered summary text.

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::api::DATE_FORMAT;
use crate::markdown::render_summary;
use crate::models::{Confidence, TeamSummary};

fn confidence_class(level: Confidence) -> &'static str {
    match level {
        Confidence::High => "badge badge-high",
        Confidence::Medium => "badge badge-medium",
        Confidence::Low => "badge badge-low",
    }
}

/// "1 update", "3 updates"
pub fn updates_label(count: u32) -> String {
    format!("{} update{}", count, if count == 1 { "" } else { "s" })
}

/// Long form of an ISO date, or the raw text if it does not parse
pub fn long_date(iso: &str) -> String {
    NaiveDate::parse_from_str(iso, DATE_FORMAT)
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

#[component]
pub fn SummaryCard(summary: TeamSummary) -> impl IntoView {
    view! {
        <div class="card summary-card">
            <div class="card-header">
                <h2 class="card-title">{summary.team_name.clone()}</h2>
                <span class=confidence_class(summary.avg_confidence)>
                    {format!("{} Confidence", summary.avg_confidence.as_str())}
                </span>
            </div>
            <div class="card-meta">
                <span>{long_date(&summary.date)}</span>
                <span>{updates_label(summary.total_updates)}</span>
            </div>
            <div class="summary-body" inner_html=render_summary(&summary.summary)></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updates_label_pluralizes() {
        assert_eq!(updates_label(0), "0 updates");
        assert_eq!(updates_label(1), "1 update");
        assert_eq!(updates_label(5), "5 updates");
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date("2024-01-15"), "Monday, January 15, 2024");
        assert_eq!(long_date("yesterday"), "yesterday");
    }
}
