use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::super::domain::{ReceiptRecord, SupplierKey};

/// Loss totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyLossSummary {
    pub year: i32,
    pub month: u32,
    pub total_loss_rupees: Decimal,
    pub supplier_loss: BTreeMap<String, Decimal>,
}

pub(crate) fn receipts_in_month(
    receipts: &[ReceiptRecord],
    year: i32,
    month: u32,
) -> impl Iterator<Item = &ReceiptRecord> {
    receipts
        .iter()
        .filter(move |r| r.receipt_date.year() == year && r.receipt_date.month() == month)
}

/// Sums stored loss for receipts within one calendar year and month.
///
/// No matching receipts yields a zero total and an empty supplier map.
pub fn monthly_loss(receipts: &[ReceiptRecord], year: i32, month: u32) -> MonthlyLossSummary {
    let mut total_loss_rupees = Decimal::ZERO;
    let mut by_supplier: BTreeMap<SupplierKey, (String, Decimal)> = BTreeMap::new();

    for receipt in receipts_in_month(receipts, year, month) {
        total_loss_rupees += receipt.loss_rupees;
        let entry = by_supplier
            .entry(receipt.supplier_key())
            .or_insert_with(|| (receipt.supplier.clone(), Decimal::ZERO));
        entry.1 += receipt.loss_rupees;
    }

    MonthlyLossSummary {
        year,
        month,
        total_loss_rupees,
        supplier_loss: by_supplier.into_values().collect(),
    }
}
