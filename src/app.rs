//! OpsPilot Frontend App
//!
//! Router and session-gated routes.

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::components::Layout;
use crate::context::{use_app_context, AppContext};
use crate::guard::{self, GuardDecision};
use crate::session_store::SessionStore;
use crate::pages::{DashboardPage, LandingPage, LoginPage, SignupPage, SubmitPage};

#[component]
pub fn App() -> impl IntoView {
    let (session_revision, set_session_revision) = signal(0u32);

    // Provide context to all children
    provide_context(AppContext::new((session_revision, set_session_revision), SessionStore::browser()));

    view! {
        <Router>
            <Layout>
                <Routes fallback=|| view! { <Redirect path=guard::Route::Landing.path() /> }>
                    <Route path=path!("/") view=|| view! { <Guarded route=guard::Route::Landing><LandingPage /></Guarded> } />
                    <Route path=path!("/login") view=|| view! { <Guarded route=guard::Route::Login><LoginPage /></Guarded> } />
                    <Route path=path!("/signup") view=|| view! { <Guarded route=guard::Route::Signup><SignupPage /></Guarded> } />
                    <Route path=path!("/submit") view=|| view! { <Guarded route=guard::Route::Submit><SubmitPage /></Guarded> } />
                    <Route path=path!("/dashboard") view=|| view! { <Guarded route=guard::Route::Dashboard><DashboardPage /></Guarded> } />
                </Routes>
            </Layout>
        </Router>
    }
}

/// Renders its children only if the guard allows `route` for the current
/// session. Re-evaluated whenever the session store changes.
#[component]
fn Guarded(route: guard::Route, children: ChildrenFn) -> impl IntoView {
    let ctx = use_app_context();
    let decision = Memo::new(move |_| guard::evaluate(route.path(), &ctx.auth_state()));

    move || match decision.get() {
        GuardDecision::Render(_) => children().into_any(),
        GuardDecision::Redirect(target) => view! { <Redirect path=target.path() /> }.into_any(),
    }
}
