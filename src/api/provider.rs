//! Hosted Auth Provider
//!
//! `AuthProvider` is everything the client needs from the external
//! auth/database service. `SupabaseProvider` speaks the GoTrue auth API and
//! PostgREST table API over an `HttpTransport`.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::config::SupabaseConfig;
use crate::error::ProviderError;
use crate::http::{HttpRequest, HttpResponse, HttpTransport, QUERY_VALUE};
use crate::models::{AuthUser, MemberRecord, NewMember, NewTeam, TeamRecord};

/// Operations delegated to the external auth/database service
#[async_trait(?Send)]
pub trait AuthProvider {
    /// Check credentials; `Ok(None)` when the provider returned no user
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<AuthUser>, ProviderError>;

    /// Create a credential; `Ok(None)` when the provider returned no user
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthUser>, ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Member row keyed by the provider-issued user id
    async fn find_member(&self, user_id: &str) -> Result<Option<MemberRecord>, ProviderError>;

    async fn team_exists(&self, team_id: &str) -> Result<bool, ProviderError>;

    /// Insert a team and return its id
    async fn create_team(&self, team: &NewTeam) -> Result<String, ProviderError>;

    async fn create_member(&self, member: &NewMember) -> Result<(), ProviderError>;
}

// ========================
// Supabase Implementation
// ========================

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

pub struct SupabaseProvider {
    config: SupabaseConfig,
    transport: Rc<dyn HttpTransport>,
    /// Access token of the current sign-in, kept in memory only
    access_token: RefCell<Option<String>>,
}

impl SupabaseProvider {
    pub fn new(config: SupabaseConfig, transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport,
            access_token: RefCell::new(None),
        }
    }

    fn bearer(&self) -> String {
        let token = self.access_token.borrow().clone();
        format!("Bearer {}", token.unwrap_or_else(|| self.config.anon_key.clone()))
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        request
            .header("apikey", self.config.anon_key.clone())
            .header("Authorization", self.bearer())
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    fn rest_url(&self, table_and_query: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table_and_query)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ProviderError> {
        Ok(self.transport.send(self.authorize(request)).await?)
    }

    /// POST credentials to an auth endpoint; returns the parsed body
    async fn post_credentials(&self, path: &str, email: &str, password: &str) -> Result<Value, ProviderError> {
        let body = serde_json::to_string(&Credentials { email, password })
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        let response = self.send(HttpRequest::post_json(self.auth_url(path), body)).await?;
        if !response.ok() {
            return Err(ProviderError::Auth(error_message(&response)));
        }
        serde_json::from_str(&response.body).map_err(|e| ProviderError::Decode(e.to_string()))
    }

    /// GET rows from a table, failing on non-2xx
    async fn select<T: serde::de::DeserializeOwned>(&self, table_and_query: &str) -> Result<Vec<T>, ProviderError> {
        let request = HttpRequest::get(self.rest_url(table_and_query)).header("Accept", "application/json");
        let response = self.send(request).await?;
        if !response.ok() {
            return Err(rejected(&response));
        }
        serde_json::from_str(&response.body).map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn insert<T: Serialize>(&self, table: &str, row: &T, prefer: &str) -> Result<HttpResponse, ProviderError> {
        let body = serde_json::to_string(row).map_err(|e| ProviderError::Decode(e.to_string()))?;
        let request = HttpRequest::post_json(self.rest_url(table), body).header("Prefer", prefer);
        let response = self.send(request).await?;
        if !response.ok() {
            return Err(rejected(&response));
        }
        Ok(response)
    }
}

#[async_trait(?Send)]
impl AuthProvider for SupabaseProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<AuthUser>, ProviderError> {
        let body = self.post_credentials("token?grant_type=password", email, password).await?;
        if let Some(token) = body.get("access_token").and_then(Value::as_str) {
            *self.access_token.borrow_mut() = Some(token.to_string());
        }
        Ok(parse_user(&body))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthUser>, ProviderError> {
        let body = self.post_credentials("signup", email, password).await?;
        Ok(parse_user(&body))
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        if self.access_token.borrow().is_none() {
            return Ok(());
        }
        let response = self.send(HttpRequest::post_json(self.auth_url("logout"), "{}".into())).await;
        *self.access_token.borrow_mut() = None;
        let response = response?;
        if !response.ok() {
            return Err(ProviderError::Auth(error_message(&response)));
        }
        Ok(())
    }

    async fn find_member(&self, user_id: &str) -> Result<Option<MemberRecord>, ProviderError> {
        let query = format!("members?select=id,team_id,role,name,email&user_id=eq.{}&limit=1", eq_value(user_id));
        let rows: Vec<MemberRecord> = self.select(&query).await?;
        Ok(rows.into_iter().next())
    }

    async fn team_exists(&self, team_id: &str) -> Result<bool, ProviderError> {
        let query = format!("teams?select=id&id=eq.{}&limit=1", eq_value(team_id));
        let rows: Vec<TeamRecord> = self.select(&query).await?;
        Ok(!rows.is_empty())
    }

    async fn create_team(&self, team: &NewTeam) -> Result<String, ProviderError> {
        let response = self.insert("teams", team, "return=representation").await?;
        let rows: Vec<TeamRecord> =
            serde_json::from_str(&response.body).map_err(|e| ProviderError::Decode(e.to_string()))?;
        rows.into_iter()
            .next()
            .map(|row| row.id)
            .ok_or_else(|| ProviderError::Decode("team insert returned no row".into()))
    }

    async fn create_member(&self, member: &NewMember) -> Result<(), ProviderError> {
        self.insert("members", member, "return=minimal").await?;
        Ok(())
    }
}

// ========================
// Response Helpers
// ========================

/// User object from an auth response (`user` wrapper or top-level)
fn parse_user(body: &Value) -> Option<AuthUser> {
    let user = body.get("user").filter(|u| u.is_object()).unwrap_or(body);
    let id = user.get("id")?.as_str()?.to_string();
    let email = user.get("email").and_then(Value::as_str).map(String::from);
    Some(AuthUser { id, email })
}

/// Human-readable message from an auth error body
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|key| body.get(*key).and_then(Value::as_str).map(String::from))
        })
        .unwrap_or_else(|| format!("HTTP {}", response.status))
}

fn rejected(response: &HttpResponse) -> ProviderError {
    ProviderError::Rejected {
        status: response.status,
        message: error_message(response),
    }
}

/// Encode a value for a PostgREST `eq.` filter
fn eq_value(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, QUERY_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use crate::models::Role;
    use crate::test_support::ScriptedTransport;

    fn provider(transport: Rc<ScriptedTransport>) -> SupabaseProvider {
        SupabaseProvider::new(
            SupabaseConfig {
                url: "https://proj.supabase.co".into(),
                anon_key: "anon-key".into(),
            },
            transport,
        )
    }

    #[tokio::test]
    async fn test_sign_in_keeps_token_for_later_requests() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, r#"{"access_token":"tok","user":{"id":"u-1","email":"a@b.co"}}"#);
        transport.respond(200, r#"[{"id":"m-1","team_id":"t-1","role":"manager","name":"Ada"}]"#);
        let provider = provider(transport.clone());

        let user = provider.sign_in("a@b.co", "secret").await.unwrap().unwrap();
        assert_eq!(user.id, "u-1");
        let member = provider.find_member(&user.id).await.unwrap().unwrap();
        assert_eq!(member.role, Some(Role::Manager));

        let sent = transport.requests();
        assert_eq!(sent[0].url, "https://proj.supabase.co/auth/v1/token?grant_type=password");
        assert_eq!(sent[0].header_value("apikey"), Some("anon-key"));
        assert_eq!(sent[0].header_value("Authorization"), Some("Bearer anon-key"));
        assert_eq!(
            sent[1].url,
            "https://proj.supabase.co/rest/v1/members?select=id,team_id,role,name,email&user_id=eq.u-1&limit=1"
        );
        assert_eq!(sent[1].method, Method::Get);
        assert_eq!(sent[1].header_value("Authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_sign_in_error_carries_provider_message() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#);
        let provider = provider(transport);

        let err = provider.sign_in("a@b.co", "wrong").await.unwrap_err();
        assert_eq!(err, ProviderError::Auth("Invalid login credentials".into()));
    }

    #[tokio::test]
    async fn test_sign_up_reads_top_level_user() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, r#"{"id":"u-9","email":"new@b.co","confirmation_sent_at":"2024-01-15T10:00:00Z"}"#);
        let provider = provider(transport);

        let user = provider.sign_up("new@b.co", "secret").await.unwrap();
        assert_eq!(user, Some(AuthUser { id: "u-9".into(), email: Some("new@b.co".into()) }));
    }

    #[tokio::test]
    async fn test_sign_up_already_registered() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(422, r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#);
        let provider = provider(transport);

        let err = provider.sign_up("dup@b.co", "secret").await.unwrap_err();
        assert_eq!(err, ProviderError::Auth("User already registered".into()));
    }

    #[tokio::test]
    async fn test_team_exists() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, r#"[{"id":"t-1"}]"#);
        transport.respond(200, "[]");
        let provider = provider(transport);

        assert!(provider.team_exists("t-1").await.unwrap());
        assert!(!provider.team_exists("ZZZ-000").await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_team_id_is_rejected() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(400, r#"{"code":"22P02","message":"invalid input syntax for type uuid"}"#);
        let provider = provider(transport);

        let err = provider.team_exists("ZZZ-000").await.unwrap_err();
        assert!(matches!(err, ProviderError::Rejected { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_create_team_returns_id() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(201, r#"[{"id":42}]"#);
        let provider = provider(transport.clone());

        let team = NewTeam {
            name: "Core".into(),
            manager_name: "Ada".into(),
            manager_email: "ada@b.co".into(),
        };
        assert_eq!(provider.create_team(&team).await.unwrap(), "42");

        let sent = transport.requests();
        assert_eq!(sent[0].url, "https://proj.supabase.co/rest/v1/teams");
        assert_eq!(sent[0].header_value("Prefer"), Some("return=representation"));
    }

    #[tokio::test]
    async fn test_create_member_posts_row() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(201, "");
        let provider = provider(transport.clone());

        let member = NewMember {
            team_id: "t-1".into(),
            user_id: "u-1".into(),
            email: "a@b.co".into(),
            name: "Ada".into(),
            role: Role::Member,
        };
        provider.create_member(&member).await.unwrap();

        let body: Value = serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["role"], "member");
        assert_eq!(body["user_id"], "u-1");
    }

    #[tokio::test]
    async fn test_sign_out_without_token_skips_network() {
        let transport = Rc::new(ScriptedTransport::new());
        let provider = provider(transport.clone());

        provider.sign_out().await.unwrap();
        assert!(transport.requests().is_empty());
    }
}
