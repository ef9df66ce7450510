//! Submission Flow
//!
//! Local validation of the daily update form and the state machine that
//! keeps the submit control disabled while a request is in flight and after
//! a successful submission.

use crate::api::SubmitOutcome;
use crate::error::ValidationError;
use crate::models::{Confidence, DailyUpdatePayload, Session};

pub const MIN_WORK_DONE_CHARS: usize = 10;

/// Raw form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateForm {
    pub work_done: String,
    pub blockers: String,
    pub confidence: Confidence,
}

impl UpdateForm {
    /// Build the webhook payload, trimming text fields
    pub fn validate(&self, session: &Session) -> Result<DailyUpdatePayload, ValidationError> {
        let work_done = self.work_done.trim();
        if work_done.chars().count() < MIN_WORK_DONE_CHARS {
            return Err(ValidationError::WorkDoneTooShort);
        }
        let blockers = self.blockers.trim();
        Ok(DailyUpdatePayload {
            member_id: session.member_id.clone(),
            team_id: session.team_id.clone(),
            work_done: work_done.to_string(),
            blockers: (!blockers.is_empty()).then(|| blockers.to_string()),
            confidence: self.confidence,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Editing,
    InFlight,
    Submitted,
}

/// Why `begin` refused to start a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeginError {
    Invalid(ValidationError),
    Busy,
    AlreadySubmitted,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionFlow {
    pub phase: SubmitPhase,
    /// Inline validation message for the work-done field
    pub field_error: Option<String>,
    /// Message from the last failed attempt
    pub failure: Option<String>,
}

impl SubmissionFlow {
    /// Controls are disabled unless editing
    pub fn controls_disabled(&self) -> bool {
        self.phase != SubmitPhase::Editing
    }

    /// Validate and move to `InFlight`; the payload must then be sent
    pub fn begin(&mut self, form: &UpdateForm, session: &Session) -> Result<DailyUpdatePayload, BeginError> {
        match self.phase {
            SubmitPhase::InFlight => return Err(BeginError::Busy),
            SubmitPhase::Submitted => return Err(BeginError::AlreadySubmitted),
            SubmitPhase::Editing => {}
        }
        match form.validate(session) {
            Ok(payload) => {
                self.field_error = None;
                self.failure = None;
                self.phase = SubmitPhase::InFlight;
                Ok(payload)
            }
            Err(e) => {
                self.field_error = Some(e.to_string());
                Err(BeginError::Invalid(e))
            }
        }
    }

    pub fn finish(&mut self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Accepted => self.phase = SubmitPhase::Submitted,
            SubmitOutcome::Rejected { message } => {
                self.phase = SubmitPhase::Editing;
                self.failure = Some(message);
            }
        }
    }
}
