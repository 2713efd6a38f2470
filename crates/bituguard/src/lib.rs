//! BituGuard: bitumen delivery tracking for a road-construction facility.
//!
//! The `deliveries` module carries the domain: tanker receipts with leakage
//! loss accounting, laboratory verdicts against grade acceptance rules, and
//! the aggregations (fraud alerts, supplier scorecard, monthly analytics,
//! audit extract) built on top of the stored records.

pub mod config;
pub mod deliveries;
pub mod error;
pub mod telemetry;
