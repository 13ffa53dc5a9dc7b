//! # services
//!
//! Application use-cases for report-board. Services depend only on the
//! ports in `domains`, so any storage adapter can be injected.

pub mod report_service;
mod validation;

pub use report_service::ReportService;
