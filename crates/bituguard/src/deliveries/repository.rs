use super::domain::{LabDraft, LabRecord, ReceiptDraft, ReceiptId, ReceiptRecord};

/// Storage abstraction so the service and aggregators can be exercised in
/// isolation.
///
/// Implementations assign ids on insert and must return records in insertion
/// order from the listing methods; the aggregators rely on that order for
/// deterministic output.
pub trait DeliveryRepository: Send + Sync {
    fn insert_receipt(&self, draft: ReceiptDraft) -> Result<ReceiptRecord, RepositoryError>;
    fn fetch_receipt(&self, id: ReceiptId) -> Result<Option<ReceiptRecord>, RepositoryError>;
    fn list_receipts(&self) -> Result<Vec<ReceiptRecord>, RepositoryError>;
    fn insert_lab(&self, draft: LabDraft) -> Result<LabRecord, RepositoryError>;
    fn list_labs(&self) -> Result<Vec<LabRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
