use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::super::domain::{LabRecord, ReceiptRecord, SupplierKey};
use super::super::quality::Verdict;

/// Leakage percentage at or above which a receipt raises a LEAKAGE alert.
const LEAKAGE_ALERT_THRESHOLD_PCT: u32 = 3;

/// FAIL-verdict count at or above which a supplier raises a quality alert.
const SUPPLIER_FAIL_ALERT_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    Leakage,
    SupplierQualityRisk,
}

/// One fraud indicator surfaced by the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudAlert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
}

/// Scans all receipts and all failed lab verdicts for fraud indicators.
///
/// Two independent passes, concatenated: leakage alerts in receipt insertion
/// order, then supplier quality alerts sorted by supplier key. Labs whose
/// parent receipt is missing from the snapshot are skipped.
pub fn scan_alerts(receipts: &[ReceiptRecord], labs: &[LabRecord]) -> Vec<FraudAlert> {
    let mut alerts = Vec::new();

    let leakage_threshold = Decimal::from(LEAKAGE_ALERT_THRESHOLD_PCT);
    for receipt in receipts {
        if receipt.leakage_pct >= leakage_threshold {
            alerts.push(FraudAlert {
                kind: AlertKind::Leakage,
                message: format!(
                    "{} ({}) leakage {}%",
                    receipt.tanker_no, receipt.grade, receipt.leakage_pct
                ),
            });
        }
    }

    let receipts_by_id: HashMap<_, _> = receipts.iter().map(|r| (r.id, r)).collect();
    let mut fails_by_supplier: BTreeMap<SupplierKey, (String, usize)> = BTreeMap::new();
    for lab in labs {
        if lab.verdict != Verdict::Fail {
            continue;
        }
        let Some(receipt) = receipts_by_id.get(&lab.receipt_id) else {
            continue;
        };
        let entry = fails_by_supplier
            .entry(receipt.supplier_key())
            .or_insert_with(|| (receipt.supplier.clone(), 0));
        entry.1 += 1;
    }

    for (_, (supplier, count)) in fails_by_supplier {
        if count >= SUPPLIER_FAIL_ALERT_THRESHOLD {
            alerts.push(FraudAlert {
                kind: AlertKind::SupplierQualityRisk,
                message: format!("{supplier} has {count} quality FAILs"),
            });
        }
    }

    alerts
}
