//! Build Configuration
//!
//! Endpoints and keys are baked in at build time (Trunk forwards the build
//! environment). A missing value only fails the code path that needs it.

use crate::error::ConfigError;

pub const SUPABASE_URL_VAR: &str = "OPSPILOT_SUPABASE_URL";
pub const SUPABASE_KEY_VAR: &str = "OPSPILOT_SUPABASE_ANON_KEY";
pub const SUBMIT_WEBHOOK_VAR: &str = "OPSPILOT_SUBMIT_WEBHOOK";
pub const SUMMARY_WEBHOOK_VAR: &str = "OPSPILOT_SUMMARY_WEBHOOK";

/// Connection details for the hosted auth/database service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub submit_webhook: Option<String>,
    pub summary_webhook: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Configuration captured from the build environment
    pub fn from_build_env() -> Self {
        Self {
            supabase_url: non_blank(option_env!("OPSPILOT_SUPABASE_URL")),
            supabase_anon_key: non_blank(option_env!("OPSPILOT_SUPABASE_ANON_KEY")),
            submit_webhook: non_blank(option_env!("OPSPILOT_SUBMIT_WEBHOOK")),
            summary_webhook: non_blank(option_env!("OPSPILOT_SUMMARY_WEBHOOK")),
            log_level: non_blank(option_env!("OPSPILOT_LOG_LEVEL")),
        }
    }

    pub fn supabase(&self) -> Result<SupabaseConfig, ConfigError> {
        let url = self.supabase_url.as_deref().ok_or(ConfigError::Missing(SUPABASE_URL_VAR))?;
        let anon_key = self.supabase_anon_key.as_deref().ok_or(ConfigError::Missing(SUPABASE_KEY_VAR))?;
        Ok(SupabaseConfig {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    pub fn submit_webhook(&self) -> Result<&str, ConfigError> {
        self.submit_webhook.as_deref().ok_or(ConfigError::Missing(SUBMIT_WEBHOOK_VAR))
    }

    pub fn summary_webhook(&self) -> Result<&str, ConfigError> {
        self.summary_webhook.as_deref().ok_or(ConfigError::Missing(SUMMARY_WEBHOOK_VAR))
    }

    /// Log filter; anything unparsable means `info`
    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(log::LevelFilter::Info)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}
