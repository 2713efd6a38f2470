use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::deliveries::domain::{
    LabDraft, LabRecord, LabReportId, ReceiptDraft, ReceiptId, ReceiptRecord, ReceiptSubmission,
};
use crate::deliveries::loss::compute_loss;
use crate::deliveries::quality::{QualityConfig, Verdict};
use crate::deliveries::repository::{DeliveryRepository, RepositoryError};
use crate::deliveries::service::DeliveryService;

pub(super) fn dec(value: &str) -> Decimal {
    value.parse().expect("valid decimal literal")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn receipt_submission() -> ReceiptSubmission {
    ReceiptSubmission {
        tanker_no: "TN-09-4521".to_string(),
        grade: "VG30".to_string(),
        quantity: dec("100"),
        received_quantity: Some(dec("97")),
        rate: dec("55000"),
        supplier: "Himalaya Bitumen".to_string(),
        receipt_date: date(2026, 1, 15),
    }
}

/// Builds a stored receipt with loss figures derived from the quantities.
pub(super) fn receipt(
    id: u64,
    tanker_no: &str,
    grade: &str,
    supplier: &str,
    quantity: &str,
    received: &str,
    receipt_date: NaiveDate,
) -> ReceiptRecord {
    let quantity = dec(quantity);
    let received = dec(received);
    let rate = dec("55000");
    let loss = compute_loss(quantity, received, rate);

    ReceiptRecord {
        id: ReceiptId(id),
        tanker_no: tanker_no.to_string(),
        grade: grade.to_string(),
        quantity,
        received_quantity: received,
        rate,
        supplier: supplier.to_string(),
        receipt_date,
        loss_mt: loss.loss_mt,
        loss_rupees: loss.loss_rupees,
        leakage_pct: loss.leakage_pct,
    }
}

/// Builds a stored receipt with the leakage percentage pinned directly.
pub(super) fn receipt_with_leakage(
    id: u64,
    supplier: &str,
    leakage_pct: &str,
    receipt_date: NaiveDate,
) -> ReceiptRecord {
    let mut record = receipt(id, &format!("TN-{id:04}"), "VG30", supplier, "100", "100", receipt_date);
    record.leakage_pct = dec(leakage_pct);
    record
}

pub(super) fn fail_lab(id: u64, receipt_id: u64) -> LabRecord {
    LabRecord {
        id: LabReportId(id),
        receipt_id: ReceiptId(receipt_id),
        penetration: 45.0,
        softening_point: 44.0,
        ductility: 60.0,
        verdict: Verdict::Fail,
        comment: "penetration 45 outside 50-70 for VG30".to_string(),
    }
}

pub(super) fn pass_lab(id: u64, receipt_id: u64) -> LabRecord {
    LabRecord {
        id: LabReportId(id),
        receipt_id: ReceiptId(receipt_id),
        penetration: 60.0,
        softening_point: 49.0,
        ductility: 80.0,
        verdict: Verdict::Pass,
        comment: "all parameters within acceptable limits for VG30".to_string(),
    }
}

pub(super) fn build_service() -> (DeliveryService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = DeliveryService::new(repository.clone(), QualityConfig::default());
    (service, repository)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    pub(super) receipts: Mutex<Vec<ReceiptRecord>>,
    pub(super) labs: Mutex<Vec<LabRecord>>,
    next_receipt_id: AtomicU64,
    next_lab_id: AtomicU64,
}

impl DeliveryRepository for MemoryRepository {
    fn insert_receipt(&self, draft: ReceiptDraft) -> Result<ReceiptRecord, RepositoryError> {
        let id = ReceiptId(self.next_receipt_id.fetch_add(1, Ordering::Relaxed) + 1);
        let record = draft.into_record(id);
        self.receipts
            .lock()
            .expect("receipt mutex poisoned")
            .push(record.clone());
        Ok(record)
    }

    fn fetch_receipt(&self, id: ReceiptId) -> Result<Option<ReceiptRecord>, RepositoryError> {
        let guard = self.receipts.lock().expect("receipt mutex poisoned");
        Ok(guard.iter().find(|r| r.id == id).cloned())
    }

    fn list_receipts(&self) -> Result<Vec<ReceiptRecord>, RepositoryError> {
        Ok(self.receipts.lock().expect("receipt mutex poisoned").clone())
    }

    fn insert_lab(&self, draft: LabDraft) -> Result<LabRecord, RepositoryError> {
        let id = LabReportId(self.next_lab_id.fetch_add(1, Ordering::Relaxed) + 1);
        let record = draft.into_record(id);
        self.labs
            .lock()
            .expect("lab mutex poisoned")
            .push(record.clone());
        Ok(record)
    }

    fn list_labs(&self) -> Result<Vec<LabRecord>, RepositoryError> {
        Ok(self.labs.lock().expect("lab mutex poisoned").clone())
    }
}

pub(super) struct UnavailableRepository;

impl DeliveryRepository for UnavailableRepository {
    fn insert_receipt(&self, _draft: ReceiptDraft) -> Result<ReceiptRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_receipt(&self, _id: ReceiptId) -> Result<Option<ReceiptRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_receipts(&self) -> Result<Vec<ReceiptRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_lab(&self, _draft: LabDraft) -> Result<LabRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_labs(&self) -> Result<Vec<LabRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
