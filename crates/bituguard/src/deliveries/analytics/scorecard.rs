use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::super::domain::{LabRecord, ReceiptRecord, SupplierKey};
use super::super::loss::round2;
use super::super::quality::Verdict;

/// Supplier-level risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        }
    }
}

/// One scorecard row for a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierScore {
    pub supplier: String,
    pub tankers: u64,
    pub avg_leakage_pct: Decimal,
    pub quality_fails: u64,
    pub risk: RiskTier,
}

struct SupplierAccumulator {
    display: String,
    tankers: u64,
    total_leakage: Decimal,
    quality_fails: u64,
}

/// Groups receipts and lab failures by supplier and assigns a risk tier.
///
/// A supplier with lab failures but no receipts never forms a group and is
/// silently dropped, matching the recorded behavior. Rows are sorted by
/// supplier key.
pub fn scorecard(receipts: &[ReceiptRecord], labs: &[LabRecord]) -> Vec<SupplierScore> {
    let mut groups: BTreeMap<SupplierKey, SupplierAccumulator> = BTreeMap::new();

    for receipt in receipts {
        let entry = groups
            .entry(receipt.supplier_key())
            .or_insert_with(|| SupplierAccumulator {
                display: receipt.supplier.clone(),
                tankers: 0,
                total_leakage: Decimal::ZERO,
                quality_fails: 0,
            });
        entry.tankers += 1;
        entry.total_leakage += receipt.leakage_pct;
    }

    let receipts_by_id: std::collections::HashMap<_, _> =
        receipts.iter().map(|r| (r.id, r)).collect();
    for lab in labs {
        if lab.verdict != Verdict::Fail {
            continue;
        }
        let Some(receipt) = receipts_by_id.get(&lab.receipt_id) else {
            continue;
        };
        if let Some(entry) = groups.get_mut(&receipt.supplier_key()) {
            entry.quality_fails += 1;
        }
    }

    groups
        .into_values()
        .map(|group| {
            let avg_leakage_pct = if group.tankers > 0 {
                round2(group.total_leakage / Decimal::from(group.tankers))
            } else {
                Decimal::ZERO
            };
            let risk = risk_tier(group.quality_fails, avg_leakage_pct);

            SupplierScore {
                supplier: group.display,
                tankers: group.tankers,
                avg_leakage_pct,
                quality_fails: group.quality_fails,
                risk,
            }
        })
        .collect()
}

fn risk_tier(quality_fails: u64, avg_leakage_pct: Decimal) -> RiskTier {
    if quality_fails >= 3 || avg_leakage_pct >= Decimal::from(5) {
        RiskTier::High
    } else if quality_fails >= 1 || avg_leakage_pct >= Decimal::from(3) {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}
