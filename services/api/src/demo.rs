use crate::infra::InMemoryDeliveryRepository;
use bituguard::deliveries::{
    render_audit_csv, DeliveryService, LabSubmission, QualityConfig, ReceiptId, ReceiptSubmission,
};
use bituguard::error::AppError;
use chrono::{Datelike, Duration, Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Month to seed receipts into, given as any date within it
    /// (YYYY-MM-DD). Defaults to the current month.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Print the audit CSV for the seeded month at the end of the demo.
    #[arg(long)]
    pub(crate) export_csv: bool,
}

struct SeedReceipt {
    tanker_no: &'static str,
    grade: &'static str,
    supplier: &'static str,
    quantity: Decimal,
    received: Decimal,
    day_offset: i64,
    lab: Option<(f64, f64, f64)>,
}

fn seed_receipts() -> Vec<SeedReceipt> {
    vec![
        SeedReceipt {
            tanker_no: "TN-09-4521",
            grade: "VG30",
            supplier: "Himalaya Bitumen",
            quantity: Decimal::from(100),
            received: Decimal::from(97),
            day_offset: 0,
            lab: Some((60.0, 49.0, 80.0)),
        },
        SeedReceipt {
            tanker_no: "TN-11-0877",
            grade: "VG10",
            supplier: "Shree Asphalt",
            quantity: Decimal::from(120),
            received: Decimal::new(1195, 1),
            day_offset: 2,
            lab: Some((90.0, 42.0, 82.0)),
        },
        SeedReceipt {
            tanker_no: "TN-07-3310",
            grade: "VG30",
            supplier: "Deccan Carriers",
            quantity: Decimal::from(100),
            received: Decimal::new(995, 1),
            day_offset: 3,
            lab: Some((45.0, 44.0, 60.0)),
        },
        SeedReceipt {
            tanker_no: "TN-07-3318",
            grade: "VG30",
            supplier: "Deccan Carriers",
            quantity: Decimal::from(100),
            received: Decimal::from(99),
            day_offset: 4,
            lab: Some((48.0, 45.0, 62.0)),
        },
        SeedReceipt {
            tanker_no: "TN-07-3324",
            grade: "VG30",
            supplier: "Deccan Carriers",
            quantity: Decimal::from(100),
            received: Decimal::new(985, 1),
            day_offset: 5,
            lab: Some((72.0, 46.0, 70.0)),
        },
    ]
}

// Seed dates anchor to the first of the month so every offset lands inside
// the month being summarized.
fn seed_anchor(base_date: NaiveDate) -> NaiveDate {
    base_date.with_day(1).unwrap_or(base_date)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { date, export_csv } = args;
    let base_date = seed_anchor(date.unwrap_or_else(|| Local::now().date_naive()));

    let repository = Arc::new(InMemoryDeliveryRepository::default());
    let service = DeliveryService::new(repository, QualityConfig::default());

    println!("BituGuard delivery tracking demo");
    println!("\nReceipts:");
    let mut receipt_ids: Vec<(ReceiptId, Option<(f64, f64, f64)>)> = Vec::new();
    for seed in seed_receipts() {
        let submission = ReceiptSubmission {
            tanker_no: seed.tanker_no.to_string(),
            grade: seed.grade.to_string(),
            quantity: seed.quantity,
            received_quantity: Some(seed.received),
            rate: Decimal::from(55000),
            supplier: seed.supplier.to_string(),
            receipt_date: base_date + Duration::days(seed.day_offset),
        };
        let record = match service.save_receipt(submission) {
            Ok(record) => record,
            Err(err) => {
                println!("  Receipt rejected: {err}");
                return Ok(());
            }
        };
        println!(
            "- {} ({}) from {}: loss {} MT | Rs {} | leakage {}%",
            record.tanker_no,
            record.grade,
            record.supplier,
            record.loss_mt,
            record.loss_rupees,
            record.leakage_pct
        );
        receipt_ids.push((record.id, seed.lab));
    }

    println!("\nLab verdicts:");
    for (receipt_id, lab) in receipt_ids {
        let Some((penetration, softening_point, ductility)) = lab else {
            continue;
        };
        let submission = LabSubmission {
            receipt_id,
            penetration,
            softening_point,
            ductility,
        };
        match service.save_lab(submission) {
            Ok(report) => {
                println!("- receipt {}: {} ({})", receipt_id, report.verdict.label(), report.comment)
            }
            Err(err) => println!("- receipt {}: rejected ({err})", receipt_id),
        }
    }

    println!("\nFraud alerts:");
    let alerts = match service.fraud_alerts() {
        Ok(alerts) => alerts,
        Err(err) => {
            println!("  unavailable: {err}");
            return Ok(());
        }
    };
    if alerts.is_empty() {
        println!("- none");
    }
    for alert in alerts {
        println!("- [{:?}] {}", alert.kind, alert.message);
    }

    println!("\nSupplier scorecard:");
    match service.supplier_scorecard() {
        Ok(scores) => {
            for score in scores {
                println!(
                    "- {}: {} tankers | avg leakage {}% | {} quality FAILs | risk {}",
                    score.supplier,
                    score.tankers,
                    score.avg_leakage_pct,
                    score.quality_fails,
                    score.risk.label()
                );
            }
        }
        Err(err) => println!("  unavailable: {err}"),
    }

    println!("\nMonthly loss ({}-{:02}):", base_date.year(), base_date.month());
    match service.monthly_loss(base_date.year(), base_date.month()) {
        Ok(summary) => {
            println!("- total Rs {}", summary.total_loss_rupees);
            for (supplier, loss) in &summary.supplier_loss {
                println!("  - {}: Rs {}", supplier, loss);
            }
        }
        Err(err) => println!("  unavailable: {err}"),
    }

    if export_csv {
        println!("\nAudit CSV:");
        let rows = match service.audit_rows(base_date.year(), base_date.month()) {
            Ok(rows) => rows,
            Err(err) => {
                println!("  unavailable: {err}");
                return Ok(());
            }
        };
        match render_audit_csv(&rows) {
            Ok(document) => match String::from_utf8(document) {
                Ok(text) => print!("{text}"),
                Err(err) => println!("  export unreadable: {err}"),
            },
            Err(err) => println!("  export failed: {err}"),
        }
    }

    Ok(())
}
