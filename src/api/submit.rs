//! Update Submission Client
//!
//! Posts one day's update to the submit webhook. The webhook decides whether
//! a member already submitted today; nothing is de-duplicated locally.

use std::rc::Rc;

use crate::http::{HttpRequest, HttpTransport};
use crate::models::DailyUpdatePayload;

pub const DEFAULT_FAILURE: &str = "Failed to submit update. You might have already submitted today.";
pub const NETWORK_FAILURE: &str = "Network error. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { message: String },
}

impl SubmitOutcome {
    pub fn success(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}

#[derive(Clone)]
pub struct SubmissionClient {
    endpoint: String,
    transport: Rc<dyn HttpTransport>,
}

impl SubmissionClient {
    pub fn new(endpoint: impl Into<String>, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    /// Single attempt; always resolves to an outcome
    pub async fn submit(&self, payload: &DailyUpdatePayload) -> SubmitOutcome {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(e) => {
                log::error!("[SUBMIT] Serialization error: {}", e);
                return SubmitOutcome::Rejected { message: DEFAULT_FAILURE.to_string() };
            }
        };

        match self.transport.send(HttpRequest::post_json(&self.endpoint, body)).await {
            Ok(response) if response.ok() => {
                log::info!("[SUBMIT] Update accepted for member {}", payload.member_id);
                SubmitOutcome::Accepted
            }
            Ok(response) => {
                log::warn!("[SUBMIT] Webhook rejected update with status {}", response.status);
                SubmitOutcome::Rejected {
                    message: response.json_message().unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
                }
            }
            Err(e) => {
                log::error!("[SUBMIT] {}", e);
                SubmitOutcome::Rejected { message: NETWORK_FAILURE.to_string() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use crate::models::Confidence;
    use crate::test_support::ScriptedTransport;

    fn payload() -> DailyUpdatePayload {
        DailyUpdatePayload {
            member_id: "m-1".into(),
            team_id: "t-1".into(),
            work_done: "Fixed the login bug today".into(),
            blockers: None,
            confidence: Confidence::High,
        }
    }

    #[tokio::test]
    async fn test_accepted_on_2xx() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, "{}");
        let client = SubmissionClient::new("https://hook.example/submit", transport.clone());

        assert_eq!(client.submit(&payload()).await, SubmitOutcome::Accepted);

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].url, "https://hook.example/submit");
        assert_eq!(sent[0].header_value("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["work_done"], "Fixed the login bug today");
        assert_eq!(body["team_id"], "t-1");
    }

    #[tokio::test]
    async fn test_rejection_prefers_server_message() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(409, r#"{"message":"You already submitted today"}"#);
        let client = SubmissionClient::new("https://hook.example/submit", transport);

        let outcome = client.submit(&payload()).await;
        assert_eq!(outcome, SubmitOutcome::Rejected { message: "You already submitted today".into() });
    }

    #[tokio::test]
    async fn test_rejection_without_message_uses_default() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(500, "Internal Server Error");
        let client = SubmissionClient::new("https://hook.example/submit", transport);

        let outcome = client.submit(&payload()).await;
        assert_eq!(outcome, SubmitOutcome::Rejected { message: DEFAULT_FAILURE.into() });
        assert!(!outcome.success());
    }

    #[tokio::test]
    async fn test_network_failure_is_distinct() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.fail("connection refused");
        let client = SubmissionClient::new("https://hook.example/submit", transport);

        let outcome = client.submit(&payload()).await;
        assert_eq!(outcome, SubmitOutcome::Rejected { message: NETWORK_FAILURE.into() });
    }
}
