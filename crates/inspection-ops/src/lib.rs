//! Core library for the property-inspection operations service.
//!
//! Tracks properties and their billing policies, schedules inspection
//! visits, runs the completion workflow that turns a visit into a permanent
//! history record, keeps an ad-hoc sundry ledger, and derives payroll
//! reports over a date window. The HTTP surface is assembled by the
//! `services/api` binary from the per-resource routers exposed here.

pub mod clock;
pub mod config;
pub mod error;
pub mod inspections;
pub mod properties;
pub mod reports;
pub mod store;
pub mod sundry;
pub mod telemetry;
