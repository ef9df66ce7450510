//! Landing Page

use leptos::prelude::*;
use leptos_router::components::A;

use crate::guard::Route;

const FEATURES: &[(&str, &str)] = &[
    ("Daily Updates", "Quick and easy daily check-ins. Team members submit updates in under 2 minutes."),
    ("AI Summaries", "Get intelligent daily summaries that highlight key progress and potential issues."),
    ("Team Visibility", "Managers get full visibility into team progress without micromanaging."),
    ("Blocker Tracking", "Identify and address blockers before they derail your projects."),
    ("Confidence Levels", "Track team confidence to spot potential issues early and provide support."),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <section class="hero">
            <h1>"Streamline Your Team's " <span class="accent">"Daily Operations"</span></h1>
            <p class="subtitle">
                "OpsPilot helps small teams track daily progress, identify blockers, and get AI-powered insights to keep projects moving forward."
            </p>
            <div class="hero-actions">
                <A href=Route::Signup.path() attr:class="primary-btn">"Get Started"</A>
                <A href=Route::Login.path() attr:class="secondary-btn">"Sign in"</A>
            </div>
        </section>

        <section class="features">
            {FEATURES.iter().map(|(title, text)| view! {
                <div class="card feature">
                    <h3>{*title}</h3>
                    <p>{*text}</p>
                </div>
            }).collect_view()}
        </section>
    }
}
