//! Audit extract: month-filtered receipt rows rendered as CSV.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

use super::analytics::receipts_in_month;
use super::domain::ReceiptRecord;

/// One spreadsheet row of the monthly audit extract, raw fields included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRow {
    pub date: NaiveDate,
    pub tanker_no: String,
    pub grade: String,
    pub supplier: String,
    pub quantity: Decimal,
    pub received_quantity: Decimal,
    pub rate: Decimal,
    pub loss_mt: Decimal,
    pub loss_rupees: Decimal,
    pub leakage_pct: Decimal,
}

impl AuditRow {
    fn from_record(record: &ReceiptRecord) -> Self {
        Self {
            date: record.receipt_date,
            tanker_no: record.tanker_no.clone(),
            grade: record.grade.clone(),
            supplier: record.supplier.clone(),
            quantity: record.quantity,
            received_quantity: record.received_quantity,
            rate: record.rate,
            loss_mt: record.loss_mt,
            loss_rupees: record.loss_rupees,
            leakage_pct: record.leakage_pct,
        }
    }
}

/// Selects the audit rows for one calendar month, in receipt insertion order.
pub fn audit_rows(receipts: &[ReceiptRecord], year: i32, month: u32) -> Vec<AuditRow> {
    receipts_in_month(receipts, year, month)
        .map(AuditRow::from_record)
        .collect()
}

const AUDIT_HEADERS: [&str; 10] = [
    "Date",
    "Tanker",
    "Grade",
    "Supplier",
    "Invoice Qty",
    "Received Qty",
    "Rate",
    "Loss MT",
    "Loss Rupees",
    "Leakage %",
];

/// Writes header plus rows to `writer` as CSV.
pub fn write_audit_csv<W: Write>(rows: &[AuditRow], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(AUDIT_HEADERS)?;

    for row in rows {
        csv_writer.write_record([
            row.date.format("%Y-%m-%d").to_string(),
            row.tanker_no.clone(),
            row.grade.clone(),
            row.supplier.clone(),
            row.quantity.to_string(),
            row.received_quantity.to_string(),
            row.rate.to_string(),
            row.loss_mt.to_string(),
            row.loss_rupees.to_string(),
            row.leakage_pct.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Renders the extract into an in-memory CSV document.
pub fn render_audit_csv(rows: &[AuditRow]) -> Result<Vec<u8>, csv::Error> {
    let mut buffer = Vec::new();
    write_audit_csv(rows, &mut buffer)?;
    Ok(buffer)
}
