//! On-demand aggregations over the stored record sets.
//!
//! Each aggregator is a pure function of the snapshot handed to it: repeated
//! calls over unchanged data return identical results, and group output is
//! sorted by supplier key so responses are reproducible.

mod alerts;
mod monthly;
mod scorecard;

pub use alerts::{scan_alerts, AlertKind, FraudAlert};
pub use monthly::{monthly_loss, MonthlyLossSummary};
pub use scorecard::{scorecard, RiskTier, SupplierScore};

pub(crate) use monthly::receipts_in_month;
