//! Property registry: addresses, billing policy selection, and the
//! last-inspection memory the billing evaluator reads.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{BillingPolicy, Property, PropertyDraft, PropertyId, PropertyUpdate};
pub use router::property_router;
pub use service::PropertyService;
