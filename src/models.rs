//! Frontend Models
//!
//! Data structures shared between the views, the session store and the
//! external services.

use serde::{de, Deserialize, Deserializer, Serialize};

// ========================
// Session
// ========================

/// Team role of a signed-in member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Manager => "manager",
        }
    }
}

/// The signed-in user's identity, persisted client-side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub member_id: String,
    pub team_id: String,
    pub role: Role,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Session {
    /// Name if known, otherwise email
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.email)
    }
}

/// Client auth state; the role is carried by the variant
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    Member(Session),
    Manager(Session),
}

impl AuthState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Member(s) | AuthState::Manager(s) => Some(s),
        }
    }

    pub fn is_manager(&self) -> bool {
        matches!(self, AuthState::Manager(_))
    }
}

impl From<Option<Session>> for AuthState {
    fn from(session: Option<Session>) -> Self {
        match session {
            None => AuthState::Anonymous,
            Some(s) if s.role == Role::Manager => AuthState::Manager(s),
            Some(s) => AuthState::Member(s),
        }
    }
}

// ========================
// Daily Update
// ========================

/// Self-reported confidence attached to a daily update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Confidence {
    Low,
    #[default]
    Medium,
    High,
}

impl Confidence {
    pub const ALL: [Confidence; 3] = [Confidence::Low, Confidence::Medium, Confidence::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Low" => Confidence::Low,
            "High" => Confidence::High,
            _ => Confidence::Medium,
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Confidence::Low => "🔴 Low",
            Confidence::Medium => "🟡 Medium",
            Confidence::High => "🟢 High",
        }
    }
}

/// Body posted to the submit webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyUpdatePayload {
    pub member_id: String,
    pub team_id: String,
    pub work_done: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockers: Option<String>,
    pub confidence: Confidence,
}

// ========================
// Summary
// ========================

/// Body returned by the summary webhook
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub avg_confidence: Option<Confidence>,
    #[serde(default)]
    pub total_updates: Option<u32>,
}

impl SummaryResponse {
    pub fn failed() -> Self {
        Self::default()
    }

    /// Full team summary when the webhook sent the aggregate fields too
    pub fn team_summary(&self) -> Option<TeamSummary> {
        Some(TeamSummary {
            team_name: self.team_name.clone()?,
            date: self.date.clone()?,
            avg_confidence: self.avg_confidence?,
            total_updates: self.total_updates?,
            summary: self.summary.clone(),
        })
    }
}

/// Aggregated summary of a team's updates for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub team_name: String,
    pub date: String,
    pub avg_confidence: Confidence,
    pub total_updates: u32,
    pub summary: String,
}

// ========================
// Provider Records
// ========================

/// User returned by the auth provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// Row of the `members` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "id_string")]
    pub team_id: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Row of the `teams` table (only the key is selected)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTeam {
    pub name: String,
    pub manager_name: String,
    pub manager_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMember {
    pub team_id: String,
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Accept string or numeric primary keys
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("invalid id: {}", other))),
    }
}
