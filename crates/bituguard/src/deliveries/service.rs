use std::sync::Arc;

use rust_decimal::Decimal;

use super::analytics::{
    monthly_loss, scan_alerts, scorecard, FraudAlert, MonthlyLossSummary, SupplierScore,
};
use super::audit::{audit_rows, AuditRow};
use super::domain::{
    LabDraft, LabRecord, LabSubmission, ReceiptDraft, ReceiptId, ReceiptRecord, ReceiptSubmission,
};
use super::loss::compute_loss;
use super::quality::{LabMeasurements, MeasurementError, QualityConfig, QualityEngine};
use super::repository::{DeliveryRepository, RepositoryError};

/// Service composing validation, the loss calculator, the verdict engine, and
/// the injected repository.
pub struct DeliveryService<R> {
    repository: Arc<R>,
    engine: QualityEngine,
}

impl<R> DeliveryService<R>
where
    R: DeliveryRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: QualityConfig) -> Self {
        Self {
            repository,
            engine: QualityEngine::new(config),
        }
    }

    /// Records a tanker delivery, computing and persisting its loss figures.
    pub fn save_receipt(
        &self,
        submission: ReceiptSubmission,
    ) -> Result<ReceiptRecord, DeliveryServiceError> {
        let tanker_no = required(&submission.tanker_no, "tanker number")?;
        let grade = required(&submission.grade, "grade")?;
        let supplier = required(&submission.supplier, "supplier")?;

        let received_quantity = submission.received_quantity.unwrap_or(Decimal::ZERO);
        non_negative(submission.quantity, "quantity")?;
        non_negative(received_quantity, "received_quantity")?;
        non_negative(submission.rate, "rate")?;

        let loss = compute_loss(submission.quantity, received_quantity, submission.rate);

        let draft = ReceiptDraft {
            tanker_no,
            grade,
            quantity: submission.quantity,
            received_quantity,
            rate: submission.rate,
            supplier,
            receipt_date: submission.receipt_date,
            loss,
        };

        Ok(self.repository.insert_receipt(draft)?)
    }

    /// Records a lab test, classifying it against the parent receipt's grade.
    pub fn save_lab(&self, submission: LabSubmission) -> Result<LabRecord, DeliveryServiceError> {
        let measurements = LabMeasurements::validated(
            submission.penetration,
            submission.softening_point,
            submission.ductility,
        )?;

        let receipt = self
            .repository
            .fetch_receipt(submission.receipt_id)?
            .ok_or(DeliveryServiceError::ReceiptNotFound(submission.receipt_id))?;

        let outcome = self.engine.classify(&receipt.grade, &measurements);

        let draft = LabDraft {
            receipt_id: receipt.id,
            penetration: measurements.penetration,
            softening_point: measurements.softening_point,
            ductility: measurements.ductility,
            verdict: outcome.verdict,
            comment: outcome.comment,
        };

        Ok(self.repository.insert_lab(draft)?)
    }

    /// Scans all stored records for fraud indicators.
    pub fn fraud_alerts(&self) -> Result<Vec<FraudAlert>, DeliveryServiceError> {
        let receipts = self.repository.list_receipts()?;
        let labs = self.repository.list_labs()?;
        Ok(scan_alerts(&receipts, &labs))
    }

    /// Builds the per-supplier risk scorecard from all stored records.
    pub fn supplier_scorecard(&self) -> Result<Vec<SupplierScore>, DeliveryServiceError> {
        let receipts = self.repository.list_receipts()?;
        let labs = self.repository.list_labs()?;
        Ok(scorecard(&receipts, &labs))
    }

    /// Sums recorded loss for one calendar month.
    pub fn monthly_loss(
        &self,
        year: i32,
        month: u32,
    ) -> Result<MonthlyLossSummary, DeliveryServiceError> {
        valid_month(month)?;
        let receipts = self.repository.list_receipts()?;
        Ok(monthly_loss(&receipts, year, month))
    }

    /// Selects the audit rows for one calendar month.
    pub fn audit_rows(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<AuditRow>, DeliveryServiceError> {
        valid_month(month)?;
        let receipts = self.repository.list_receipts()?;
        Ok(audit_rows(&receipts, year, month))
    }
}

fn required(value: &str, name: &'static str) -> Result<String, DeliveryServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DeliveryServiceError::Validation(format!("{name} required")));
    }
    Ok(trimmed.to_string())
}

fn non_negative(value: Decimal, name: &'static str) -> Result<(), DeliveryServiceError> {
    if value < Decimal::ZERO {
        return Err(DeliveryServiceError::Validation(format!(
            "{name} must not be negative"
        )));
    }
    Ok(())
}

fn valid_month(month: u32) -> Result<(), DeliveryServiceError> {
    if !(1..=12).contains(&month) {
        return Err(DeliveryServiceError::Validation(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    Ok(())
}

/// Error raised by the delivery service.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryServiceError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Measurement(#[from] MeasurementError),
    #[error("receipt {0} not found")]
    ReceiptNotFound(ReceiptId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
