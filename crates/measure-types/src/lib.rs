//! Boundary types for the door measurement report engine
//!
//! These are the shapes the data-entry side hands to the report engine:
//! validated measurement records plus the site/building scope of a report
//! request. Storage and transport live upstream; nothing here touches either.

pub mod types;

pub use types::{DoorCategory, MeasurementRecord, ReportRequest};
