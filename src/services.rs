//! Service Wiring
//!
//! Builds the gateway and clients from the build configuration with the
//! browser implementations plugged in.

use std::rc::Rc;

use chrono::NaiveDate;

use crate::api::{SubmissionClient, SummaryClient, SupabaseProvider};
use crate::auth::AuthGateway;
use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::http::FetchTransport;
use crate::session_store::SessionStore;

thread_local! {
    // One provider per page so the in-memory access token survives between calls
    static AUTH_GATEWAY: Result<AuthGateway, ConfigError> = build_auth_gateway();
}

fn build_auth_gateway() -> Result<AuthGateway, ConfigError> {
    let supabase = AppConfig::from_build_env().supabase()?;
    let provider = SupabaseProvider::new(supabase, Rc::new(FetchTransport));
    Ok(AuthGateway::new(Rc::new(provider), SessionStore::browser()))
}

pub fn auth_gateway() -> Result<AuthGateway, ConfigError> {
    AUTH_GATEWAY.with(|gateway| gateway.clone())
}

pub fn submission_client() -> Result<SubmissionClient, ConfigError> {
    let config = AppConfig::from_build_env();
    Ok(SubmissionClient::new(config.submit_webhook()?, Rc::new(FetchTransport)))
}

pub fn summary_client() -> Result<SummaryClient, ConfigError> {
    let config = AppConfig::from_build_env();
    Ok(SummaryClient::new(config.summary_webhook()?, Rc::new(FetchTransport)))
}

/// Today in the browser's local time zone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
