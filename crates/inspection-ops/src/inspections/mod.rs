//! Inspection visits: scheduling CRUD, the billing evaluator, the
//! completion workflow, and the append-only record history.

pub mod billing;
pub mod domain;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use billing::should_charge;
pub use domain::{
    CompletionInput, InspectionRecord, InspectionStatus, InspectionTask, InspectionType,
    RecordId, RecordView, TaskDraft, TaskId, TaskUpdate, TaskView,
};
pub use router::inspection_router;
pub use service::InspectionService;
