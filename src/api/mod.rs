//! External Service Bindings
//!
//! Clients for the hosted auth/database service and the two workflow
//! webhooks, organized by service.

mod provider;
mod submit;
mod summary;

pub use provider::*;
pub use submit::*;
pub use summary::*;
