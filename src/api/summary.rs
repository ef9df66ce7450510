//! Summary Fetch Client
//!
//! Reads the precomputed team summary for one date. Any failure collapses to
//! an unsuccessful, empty response.

use std::rc::Rc;

use chrono::NaiveDate;

use crate::http::{with_query, HttpRequest, HttpTransport};
use crate::models::SummaryResponse;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct SummaryClient {
    endpoint: String,
    transport: Rc<dyn HttpTransport>,
}

impl SummaryClient {
    pub fn new(endpoint: impl Into<String>, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    pub async fn fetch(&self, team_id: &str, date: NaiveDate) -> SummaryResponse {
        let date = date.format(DATE_FORMAT).to_string();
        let url = with_query(&self.endpoint, &[("team_id", team_id), ("date", &date)]);

        match self.transport.send(HttpRequest::get(url)).await {
            Ok(response) if response.ok() => match serde_json::from_str::<SummaryResponse>(&response.body) {
                Ok(summary) => summary,
                Err(e) => {
                    log::warn!("[SUMMARY] Unreadable summary for {}: {}", date, e);
                    SummaryResponse::failed()
                }
            },
            Ok(response) => {
                log::info!("[SUMMARY] No summary for team {} on {} (status {})", team_id, date, response.status);
                SummaryResponse::failed()
            }
            Err(e) => {
                log::error!("[SUMMARY] {}", e);
                SummaryResponse::failed()
            }
        }
    }
}
