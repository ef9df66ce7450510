//! UI Components
//!
//! Reusable Leptos components.

mod layout;
mod update_form;
mod summary_card;

pub use layout::Layout;
pub use update_form::UpdateFormView;
pub use summary_card::SummaryCard;
