//! Payroll reporting: a read-only aggregation of charged inspections and
//! sundry ledger entries over an inclusive date window.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{PayrollReport, ReportPeriod, ReportSummary};
pub use router::report_router;
pub use service::ReportService;
