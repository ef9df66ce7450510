//! Error Types
//!
//! Typed failures for every boundary in the client. Gateways and clients
//! convert these into displayable results; nothing reaches the view as a panic.

use thiserror::Error;

// ========================
// Configuration
// ========================

/// A required build-time value was not provided
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),
}

// ========================
// Transport / Provider
// ========================

/// Failure to obtain any HTTP response at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request could not be built: {0}")]
    Build(String),
}

/// Failures reported by (or while talking to) the hosted auth/database service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Auth endpoint rejected the call with a human-readable message
    #[error("auth error: {0}")]
    Auth(String),
    /// Table endpoint answered with a non-2xx status
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// ========================
// User-facing
// ========================

/// Local form validation failures, shown next to the form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please describe your work in at least 10 characters")]
    WorkDoneTooShort,
    #[error("Please enter both email and password.")]
    MissingCredentials,
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,
}

/// Outcome categories of the auth gateway. `Display` is the exact text shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect email or password. Please try again.")]
    InvalidCredentials,
    #[error("Please check your email and confirm your account first.")]
    EmailNotConfirmed,
    #[error("An account with this email already exists. Try logging in.")]
    AlreadyRegistered,
    #[error("Account not found. Please sign up first.")]
    AccountNotFound,
    #[error("Invalid Team ID. Please check with your manager.")]
    InvalidTeamId,
    #[error("Unable to create team. Please try again.")]
    TeamCreationFailed,
    /// Auth credential exists but the member row could not be written
    #[error("Unable to complete registration. Please try again.")]
    RegistrationIncomplete,
    #[error("Something went wrong. Please try again later.")]
    Unknown,
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl AuthError {
    /// Map a provider-reported message onto a friendly category
    pub fn from_provider_message(message: &str) -> Self {
        match message {
            "Invalid login credentials" => AuthError::InvalidCredentials,
            "Email not confirmed" => AuthError::EmailNotConfirmed,
            "User already registered" => AuthError::AlreadyRegistered,
            _ => AuthError::Unknown,
        }
    }
}

impl From<ProviderError> for AuthError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Auth(message) => AuthError::from_provider_message(&message),
            _ => AuthError::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_provider_messages_map_to_categories() {
        assert_eq!(AuthError::from_provider_message("Invalid login credentials"), AuthError::InvalidCredentials);
        assert_eq!(AuthError::from_provider_message("Email not confirmed"), AuthError::EmailNotConfirmed);
        assert_eq!(AuthError::from_provider_message("User already registered"), AuthError::AlreadyRegistered);
    }

    #[test]
    fn test_unmapped_message_falls_back_to_unknown() {
        let err = AuthError::from_provider_message("Database exploded");
        assert_eq!(err, AuthError::Unknown);
        assert_eq!(err.to_string(), "Something went wrong. Please try again later.");
    }

    #[test]
    fn test_transport_failure_is_unknown_to_the_user() {
        let err: AuthError = ProviderError::Transport(TransportError::Network("offline".into())).into();
        assert_eq!(err, AuthError::Unknown);
    }

    #[test]
    fn test_config_error_is_displayable() {
        let err: AuthError = ConfigError::Missing("OPSPILOT_SUPABASE_URL").into();
        assert_eq!(err.to_string(), "OPSPILOT_SUPABASE_URL is not configured");
    }
}
