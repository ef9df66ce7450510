//! Route Guard
//!
//! Pure decision of whether a path may render for the current auth state.
//! Callers must pass a freshly read auth state on every navigation.

use crate::models::AuthState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Signup,
    Submit,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Submit => "/submit",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Known route for a path; a single trailing slash is tolerated
    pub fn from_path(path: &str) -> Option<Route> {
        let path = match path {
            "/" => "/",
            p => p.strip_suffix('/').unwrap_or(p),
        };
        match path {
            "/" => Some(Route::Landing),
            "/login" => Some(Route::Login),
            "/signup" => Some(Route::Signup),
            "/submit" => Some(Route::Submit),
            "/dashboard" => Some(Route::Dashboard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    Redirect(Route),
}

pub fn evaluate(path: &str, auth: &AuthState) -> GuardDecision {
    let Some(route) = Route::from_path(path) else {
        return GuardDecision::Redirect(Route::Landing);
    };

    let decision = match (route, auth) {
        (Route::Submit | Route::Dashboard, AuthState::Anonymous) => GuardDecision::Redirect(Route::Login),
        (Route::Dashboard, AuthState::Member(_)) => GuardDecision::Redirect(Route::Submit),
        (Route::Login | Route::Signup, AuthState::Member(_) | AuthState::Manager(_)) => {
            GuardDecision::Redirect(Route::Submit)
        }
        (route, _) => GuardDecision::Render(route),
    };

    if let GuardDecision::Redirect(target) = decision {
        log::debug!("[GUARD] {} -> {}", path, target.path());
    }
    decision
}
