//! Test Doubles
//!
//! In-memory storage, a scripted HTTP transport and a scripted auth provider.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;

use crate::api::AuthProvider;
use crate::error::{ProviderError, TransportError};
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::models::{AuthUser, MemberRecord, NewMember, NewTeam};
use crate::storage::KeyValueStorage;

// ========================
// Storage
// ========================

#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

// ========================
// Transport
// ========================

/// Replies with queued responses in order and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, reason: &str) {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError::Network(reason.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".into())))
    }
}

// ========================
// Auth Provider
// ========================

/// Provider with fixed answers per operation and call counters
pub struct ScriptedProvider {
    pub sign_in_result: RefCell<Result<Option<AuthUser>, ProviderError>>,
    pub sign_up_result: RefCell<Result<Option<AuthUser>, ProviderError>>,
    pub sign_out_result: RefCell<Result<(), ProviderError>>,
    pub member: RefCell<Result<Option<MemberRecord>, ProviderError>>,
    pub team_exists_result: RefCell<Result<bool, ProviderError>>,
    pub create_team_result: RefCell<Result<String, ProviderError>>,
    pub create_member_result: RefCell<Result<(), ProviderError>>,
    pub sign_up_calls: Cell<u32>,
    pub sign_out_calls: Cell<u32>,
    pub created_teams: RefCell<Vec<NewTeam>>,
    pub created_members: RefCell<Vec<NewMember>>,
    pub member_lookups: RefCell<Vec<String>>,
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self {
            sign_in_result: RefCell::new(Ok(Some(user()))),
            sign_up_result: RefCell::new(Ok(Some(user()))),
            sign_out_result: RefCell::new(Ok(())),
            member: RefCell::new(Ok(None)),
            team_exists_result: RefCell::new(Ok(true)),
            create_team_result: RefCell::new(Ok("team-1".into())),
            create_member_result: RefCell::new(Ok(())),
            sign_up_calls: Cell::new(0),
            sign_out_calls: Cell::new(0),
            created_teams: RefCell::new(Vec::new()),
            created_members: RefCell::new(Vec::new()),
            member_lookups: RefCell::new(Vec::new()),
        }
    }
}

pub fn user() -> AuthUser {
    AuthUser {
        id: "user-1".into(),
        email: Some("ada@example.com".into()),
    }
}

#[async_trait(?Send)]
impl AuthProvider for ScriptedProvider {
    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Option<AuthUser>, ProviderError> {
        self.sign_in_result.borrow().clone()
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<Option<AuthUser>, ProviderError> {
        self.sign_up_calls.set(self.sign_up_calls.get() + 1);
        self.sign_up_result.borrow().clone()
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.sign_out_calls.set(self.sign_out_calls.get() + 1);
        self.sign_out_result.borrow().clone()
    }

    async fn find_member(&self, user_id: &str) -> Result<Option<MemberRecord>, ProviderError> {
        self.member_lookups.borrow_mut().push(user_id.to_string());
        self.member.borrow().clone()
    }

    async fn team_exists(&self, _team_id: &str) -> Result<bool, ProviderError> {
        self.team_exists_result.borrow().clone()
    }

    async fn create_team(&self, team: &NewTeam) -> Result<String, ProviderError> {
        self.created_teams.borrow_mut().push(team.clone());
        self.create_team_result.borrow().clone()
    }

    async fn create_member(&self, member: &NewMember) -> Result<(), ProviderError> {
        self.created_members.borrow_mut().push(member.clone());
        self.create_member_result.borrow().clone()
    }
}
