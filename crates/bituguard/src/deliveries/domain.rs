use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::loss::LossBreakdown;
use super::quality::Verdict;

/// Identifier assigned to a tanker receipt by the repository.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ReceiptId(pub u64);

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier assigned to a laboratory report by the repository.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LabReportId(pub u64);

impl fmt::Display for LabReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized supplier identity used for every grouping operation.
///
/// Supplier matching is case-insensitive system-wide; display spelling is
/// carried separately as the first-seen original string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SupplierKey(String);

impl SupplierKey {
    pub fn new(supplier: &str) -> Self {
        Self(supplier.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn default_rate() -> Decimal {
    Decimal::from(55_000)
}

/// Inbound payload for recording a tanker delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptSubmission {
    pub tanker_no: String,
    pub grade: String,
    /// Invoiced quantity in metric tons.
    pub quantity: Decimal,
    /// Measured quantity in metric tons; absent before weighbridge measurement.
    #[serde(default)]
    pub received_quantity: Option<Decimal>,
    /// Rupees per metric ton.
    #[serde(default = "default_rate")]
    pub rate: Decimal,
    pub supplier: String,
    pub receipt_date: NaiveDate,
}

/// Inbound payload for recording a laboratory test against a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabSubmission {
    pub receipt_id: ReceiptId,
    /// Penetration at 25 degC, tenths of a millimeter.
    pub penetration: f64,
    /// Softening point, degC.
    pub softening_point: f64,
    /// Ductility at 27 degC, centimeters.
    pub ductility: f64,
}

/// Receipt fields validated by the service, awaiting an id from the repository.
#[derive(Debug, Clone)]
pub struct ReceiptDraft {
    pub tanker_no: String,
    pub grade: String,
    pub quantity: Decimal,
    pub received_quantity: Decimal,
    pub rate: Decimal,
    pub supplier: String,
    pub receipt_date: NaiveDate,
    pub loss: LossBreakdown,
}

impl ReceiptDraft {
    pub fn into_record(self, id: ReceiptId) -> ReceiptRecord {
        ReceiptRecord {
            id,
            tanker_no: self.tanker_no,
            grade: self.grade,
            quantity: self.quantity,
            received_quantity: self.received_quantity,
            rate: self.rate,
            supplier: self.supplier,
            receipt_date: self.receipt_date,
            loss_mt: self.loss.loss_mt,
            loss_rupees: self.loss.loss_rupees,
            leakage_pct: self.loss.leakage_pct,
        }
    }
}

/// One tanker delivery event; immutable once stored.
///
/// Loss figures are computed at creation time and persisted, never re-derived
/// at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    pub id: ReceiptId,
    pub tanker_no: String,
    pub grade: String,
    pub quantity: Decimal,
    pub received_quantity: Decimal,
    pub rate: Decimal,
    pub supplier: String,
    pub receipt_date: NaiveDate,
    pub loss_mt: Decimal,
    pub loss_rupees: Decimal,
    pub leakage_pct: Decimal,
}

impl ReceiptRecord {
    pub fn supplier_key(&self) -> SupplierKey {
        SupplierKey::new(&self.supplier)
    }
}

/// Lab fields validated and classified by the service, awaiting an id.
#[derive(Debug, Clone)]
pub struct LabDraft {
    pub receipt_id: ReceiptId,
    pub penetration: f64,
    pub softening_point: f64,
    pub ductility: f64,
    pub verdict: Verdict,
    pub comment: String,
}

impl LabDraft {
    pub fn into_record(self, id: LabReportId) -> LabRecord {
        LabRecord {
            id,
            receipt_id: self.receipt_id,
            penetration: self.penetration,
            softening_point: self.softening_point,
            ductility: self.ductility,
            verdict: self.verdict,
            comment: self.comment,
        }
    }
}

/// One quality test result tied to a receipt; read-only after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabRecord {
    pub id: LabReportId,
    pub receipt_id: ReceiptId,
    pub penetration: f64,
    pub softening_point: f64,
    pub ductility: f64,
    pub verdict: Verdict,
    pub comment: String,
}

/// Response body for a stored receipt.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptCreatedView {
    pub receipt_id: ReceiptId,
    pub loss_rupees: Decimal,
    pub leakage_pct: Decimal,
}

impl ReceiptCreatedView {
    pub fn from_record(record: &ReceiptRecord) -> Self {
        Self {
            receipt_id: record.id,
            loss_rupees: record.loss_rupees,
            leakage_pct: record.leakage_pct,
        }
    }
}

/// Response body for a stored lab report.
#[derive(Debug, Clone, Serialize)]
pub struct LabCreatedView {
    pub lab_id: LabReportId,
    pub verdict: &'static str,
    pub comment: String,
}

impl LabCreatedView {
    pub fn from_record(record: &LabRecord) -> Self {
        Self {
            lab_id: record.id,
            verdict: record.verdict.label(),
            comment: record.comment.clone(),
        }
    }
}
