//! Tanker delivery tracking: receipts, lab verdicts, and risk aggregation.
//!
//! Receipts carry their loss figures from creation time; lab reports carry an
//! immutable verdict classified against the parent receipt's grade. The
//! aggregators in [`analytics`] and the [`audit`] extract read a committed
//! snapshot through the injected [`repository::DeliveryRepository`] and hold
//! no state of their own.

pub mod analytics;
pub mod audit;
pub mod domain;
pub(crate) mod grades;
pub mod loss;
pub mod quality;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use analytics::{
    monthly_loss, scan_alerts, scorecard, AlertKind, FraudAlert, MonthlyLossSummary, RiskTier,
    SupplierScore,
};
pub use audit::{audit_rows, render_audit_csv, write_audit_csv, AuditRow};
pub use domain::{
    LabCreatedView, LabDraft, LabRecord, LabReportId, LabSubmission, ReceiptCreatedView,
    ReceiptDraft, ReceiptId, ReceiptRecord, ReceiptSubmission, SupplierKey,
};
pub use grades::GradeSpec;
pub use loss::{compute_loss, LossBreakdown};
pub use quality::{
    LabMeasurements, LabVerdict, MeasurementError, QualityConfig, QualityEngine, Verdict,
    VerdictPolicy,
};
pub use repository::{DeliveryRepository, RepositoryError};
pub use router::delivery_router;
pub use service::{DeliveryService, DeliveryServiceError};
