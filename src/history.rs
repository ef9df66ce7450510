//! Local Update History
//!
//! Browser-local record of updates sent from this client. Informational
//! only: the submit webhook stays authoritative about duplicates.

use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Confidence, DailyUpdatePayload};
use crate::storage::{BrowserStorage, KeyValueStorage};

pub const UPDATES_KEY: &str = "opspilot_updates";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentUpdate {
    pub member_id: String,
    pub date: NaiveDate,
    pub confidence: Confidence,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct UpdateHistory {
    storage: Rc<dyn KeyValueStorage>,
}

impl UpdateHistory {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn browser() -> Self {
        Self::new(Rc::new(BrowserStorage))
    }

    /// All recorded updates; corrupt data reads as empty
    pub fn list(&self) -> Vec<SentUpdate> {
        self.storage
            .get(UPDATES_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn record(&self, payload: &DailyUpdatePayload, at: DateTime<Utc>, local_date: NaiveDate) -> SentUpdate {
        let entry = SentUpdate {
            member_id: payload.member_id.clone(),
            date: local_date,
            confidence: payload.confidence,
            submitted_at: at,
        };
        let mut updates = self.list();
        updates.push(entry.clone());
        match serde_json::to_string(&updates) {
            Ok(json) => self.storage.set(UPDATES_KEY, &json),
            Err(e) => log::error!("[HISTORY] Failed to serialize history: {}", e),
        }
        entry
    }

    pub fn sent_on(&self, member_id: &str, date: NaiveDate) -> bool {
        self.list().iter().any(|u| u.member_id == member_id && u.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryStorage;

    fn payload(member_id: &str) -> DailyUpdatePayload {
        DailyUpdatePayload {
            member_id: member_id.into(),
            team_id: "t-1".into(),
            work_done: "Fixed the login bug today".into(),
            blockers: None,
            confidence: Confidence::Low,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_record_and_query() {
        let history = UpdateHistory::new(Rc::new(MemoryStorage::default()));
        history.record(&payload("m-1"), Utc::now(), day(15));

        assert!(history.sent_on("m-1", day(15)));
        assert!(!history.sent_on("m-1", day(16)));
        assert!(!history.sent_on("m-2", day(15)));
        assert_eq!(history.list().len(), 1);
        assert_eq!(history.list()[0].confidence, Confidence::Low);
    }

    #[test]
    fn test_corrupt_history_is_empty() {
        let storage = Rc::new(MemoryStorage::default());
        storage.set(UPDATES_KEY, "[{broken");
        let history = UpdateHistory::new(storage);
        assert!(history.list().is_empty());

        history.record(&payload("m-1"), Utc::now(), day(15));
        assert_eq!(history.list().len(), 1);
    }
}
