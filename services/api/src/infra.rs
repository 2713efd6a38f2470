use bituguard::deliveries::{
    DeliveryRepository, LabDraft, LabRecord, LabReportId, ReceiptDraft, ReceiptId, ReceiptRecord,
    RepositoryError,
};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store for receipts and lab reports. Records keep their
/// insertion order so the aggregated views stay deterministic.
#[derive(Default)]
pub(crate) struct InMemoryDeliveryRepository {
    receipts: Mutex<Vec<ReceiptRecord>>,
    labs: Mutex<Vec<LabRecord>>,
    next_receipt_id: AtomicU64,
    next_lab_id: AtomicU64,
}

impl DeliveryRepository for InMemoryDeliveryRepository {
    fn insert_receipt(&self, draft: ReceiptDraft) -> Result<ReceiptRecord, RepositoryError> {
        let id = ReceiptId(self.next_receipt_id.fetch_add(1, Ordering::Relaxed) + 1);
        let record = draft.into_record(id);
        let mut guard = self.receipts.lock().expect("receipt mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch_receipt(&self, id: ReceiptId) -> Result<Option<ReceiptRecord>, RepositoryError> {
        let guard = self.receipts.lock().expect("receipt mutex poisoned");
        Ok(guard.iter().find(|record| record.id == id).cloned())
    }

    fn list_receipts(&self) -> Result<Vec<ReceiptRecord>, RepositoryError> {
        Ok(self.receipts.lock().expect("receipt mutex poisoned").clone())
    }

    fn insert_lab(&self, draft: LabDraft) -> Result<LabRecord, RepositoryError> {
        let id = LabReportId(self.next_lab_id.fetch_add(1, Ordering::Relaxed) + 1);
        let record = draft.into_record(id);
        let mut guard = self.labs.lock().expect("lab mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn list_labs(&self) -> Result<Vec<LabRecord>, RepositoryError> {
        Ok(self.labs.lock().expect("lab mutex poisoned").clone())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
