//! Auth Gateway
//!
//! Wraps the external auth provider and is the only writer of the session
//! store. Every failure comes back as an `AuthError` whose `Display` is the
//! message shown to the user.
//!
//! State transitions: `Anonymous --sign_in--> Member|Manager`,
//! `Member|Manager --sign_out--> Anonymous`. Sign-up never signs in.

use std::future::Future;
use std::rc::Rc;

use crate::api::AuthProvider;
use crate::error::{AuthError, ValidationError};
use crate::models::{NewMember, NewTeam, Role, Session};
use crate::session_store::SessionStore;

/// Input of the "create team" sign-up tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerSignUp {
    pub email: String,
    pub password: String,
    pub name: String,
    pub team_name: String,
}

/// Input of the "join team" sign-up tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSignUp {
    pub email: String,
    pub password: String,
    pub name: String,
    pub team_id: String,
}

/// Shortest password the sign-up forms accept
pub const MIN_PASSWORD_CHARS: usize = 6;

fn require_filled(fields: &[&str]) -> Result<(), ValidationError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

fn require_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

#[derive(Clone)]
pub struct AuthGateway {
    provider: Rc<dyn AuthProvider>,
    store: SessionStore,
}

impl AuthGateway {
    pub fn new(provider: Rc<dyn AuthProvider>, store: SessionStore) -> Self {
        Self { provider, store }
    }

    /// Check credentials, resolve the member row and persist the session.
    /// The store is untouched on any failure.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let user = match self.provider.sign_in(email, password).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                log::warn!("[AUTH] Provider accepted {} but returned no user", email);
                return Err(AuthError::Unknown);
            }
            Err(e) => {
                log::warn!("[AUTH] Sign-in failed for {}: {}", email, e);
                return Err(e.into());
            }
        };

        let member = match self.provider.find_member(&user.id).await {
            Ok(Some(member)) => member,
            Ok(None) => {
                log::warn!("[AUTH] No member row for user {}", user.id);
                return Err(AuthError::AccountNotFound);
            }
            Err(e) => {
                log::error!("[AUTH] Member lookup failed for user {}: {}", user.id, e);
                return Err(AuthError::AccountNotFound);
            }
        };

        let session = Session {
            member_id: member.id,
            team_id: member.team_id,
            role: member.role.unwrap_or_default(),
            email: member.email.or(user.email).unwrap_or_else(|| email.to_string()),
            name: member.name,
        };
        self.store.save(&session);
        log::info!("[AUTH] Signed in {} as {}", session.email, session.role.as_str());
        Ok(session)
    }

    /// Credential, then team, then manager member row. No rollback: a failure
    /// after the first step leaves the credential behind.
    pub async fn sign_up_manager(&self, form: &ManagerSignUp) -> Result<(), AuthError> {
        require_filled(&[&form.email, &form.password, &form.name, &form.team_name])?;
        require_password(&form.password)?;
        let email = form.email.trim();
        let name = form.name.trim();

        let user = self.create_credential(email, &form.password).await?;

        let team = NewTeam {
            name: form.team_name.trim().to_string(),
            manager_name: name.to_string(),
            manager_email: email.to_string(),
        };
        let team_id = self.provider.create_team(&team).await.map_err(|e| {
            log::error!("[AUTH] Team creation failed after credential for {} was created: {}", email, e);
            AuthError::TeamCreationFailed
        })?;

        self.create_member_row(NewMember {
            team_id,
            user_id: user,
            email: email.to_string(),
            name: name.to_string(),
            role: Role::Manager,
        })
        .await
    }

    /// Team check first so a bad team id never creates a credential
    pub async fn sign_up_member(&self, form: &MemberSignUp) -> Result<(), AuthError> {
        require_filled(&[&form.email, &form.password, &form.name, &form.team_id])?;
        require_password(&form.password)?;
        let email = form.email.trim();
        let team_id = form.team_id.trim();

        match self.provider.team_exists(team_id).await {
            Ok(true) => {}
            Ok(false) => return Err(AuthError::InvalidTeamId),
            Err(e) => {
                log::warn!("[AUTH] Team lookup for {} failed: {}", team_id, e);
                return Err(AuthError::InvalidTeamId);
            }
        }

        let user = self.create_credential(email, &form.password).await?;

        self.create_member_row(NewMember {
            team_id: team_id.to_string(),
            user_id: user,
            email: email.to_string(),
            name: form.name.trim().to_string(),
            role: Role::Member,
        })
        .await
    }

    /// Clears the local session immediately; the returned future revokes the
    /// provider session and can be spawned without being awaited.
    pub fn sign_out(&self) -> impl Future<Output = ()> + 'static {
        self.store.clear();
        log::info!("[AUTH] Local session cleared");
        let provider = self.provider.clone();
        async move {
            if let Err(e) = provider.sign_out().await {
                log::warn!("[AUTH] Provider sign-out failed: {}", e);
            }
        }
    }

    async fn create_credential(&self, email: &str, password: &str) -> Result<String, AuthError> {
        match self.provider.sign_up(email, password).await {
            Ok(Some(user)) => Ok(user.id),
            Ok(None) => Err(AuthError::Unknown),
            Err(e) => {
                log::warn!("[AUTH] Sign-up failed for {}: {}", email, e);
                Err(e.into())
            }
        }
    }

    async fn create_member_row(&self, member: NewMember) -> Result<(), AuthError> {
        match self.provider.create_member(&member).await {
            Ok(()) => {
                log::info!("[AUTH] Registered {} as {}", member.email, member.role.as_str());
                Ok(())
            }
            Err(e) => {
                log::error!("[AUTH] Credential for {} has no member row: {}", member.email, e);
                Err(AuthError::RegistrationIncomplete)
            }
        }
    }
}
