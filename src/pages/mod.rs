//! Pages
//!
//! One component per route.

mod landing;
mod login;
mod signup;
mod submit;
mod dashboard;

pub use landing::LandingPage;
pub use login::LoginPage;
pub use signup::SignupPage;
pub use submit::SubmitPage;
pub use dashboard::DashboardPage;
