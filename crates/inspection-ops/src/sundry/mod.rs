//! Sundry ledger: ad-hoc paid chores outside the inspection schedule.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{SundryDraft, SundryId, SundryTask, SundryUpdate};
pub use router::sundry_router;
pub use service::SundryService;
