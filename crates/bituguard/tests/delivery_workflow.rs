//! Integration specifications for the tanker delivery intake and analytics workflow.
//!
//! Scenarios exercise end-to-end behavior through the public service facade and
//! HTTP router so receipts, lab verdicts, and the aggregated views stay in
//! agreement without reaching into private modules.

mod common {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use bituguard::deliveries::domain::{
        LabDraft, LabRecord, LabReportId, LabSubmission, ReceiptDraft, ReceiptId, ReceiptRecord,
        ReceiptSubmission,
    };
    use bituguard::deliveries::repository::{DeliveryRepository, RepositoryError};
    use bituguard::deliveries::{DeliveryService, QualityConfig};

    pub(super) fn dec(value: &str) -> Decimal {
        value.parse().expect("valid decimal literal")
    }

    pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    pub(super) fn submission(
        tanker_no: &str,
        supplier: &str,
        quantity: &str,
        received: &str,
        receipt_date: NaiveDate,
    ) -> ReceiptSubmission {
        ReceiptSubmission {
            tanker_no: tanker_no.to_string(),
            grade: "VG30".to_string(),
            quantity: dec(quantity),
            received_quantity: Some(dec(received)),
            rate: dec("55000"),
            supplier: supplier.to_string(),
            receipt_date,
        }
    }

    pub(super) fn lab(receipt_id: ReceiptId, penetration: f64) -> LabSubmission {
        LabSubmission {
            receipt_id,
            penetration,
            softening_point: 49.0,
            ductility: 80.0,
        }
    }

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        receipts: Mutex<Vec<ReceiptRecord>>,
        labs: Mutex<Vec<LabRecord>>,
        next_receipt_id: AtomicU64,
        next_lab_id: AtomicU64,
    }

    impl DeliveryRepository for MemoryRepository {
        fn insert_receipt(&self, draft: ReceiptDraft) -> Result<ReceiptRecord, RepositoryError> {
            let id = ReceiptId(self.next_receipt_id.fetch_add(1, Ordering::Relaxed) + 1);
            let record = draft.into_record(id);
            self.receipts.lock().expect("lock").push(record.clone());
            Ok(record)
        }

        fn fetch_receipt(&self, id: ReceiptId) -> Result<Option<ReceiptRecord>, RepositoryError> {
            let guard = self.receipts.lock().expect("lock");
            Ok(guard.iter().find(|r| r.id == id).cloned())
        }

        fn list_receipts(&self) -> Result<Vec<ReceiptRecord>, RepositoryError> {
            Ok(self.receipts.lock().expect("lock").clone())
        }

        fn insert_lab(&self, draft: LabDraft) -> Result<LabRecord, RepositoryError> {
            let id = LabReportId(self.next_lab_id.fetch_add(1, Ordering::Relaxed) + 1);
            let record = draft.into_record(id);
            self.labs.lock().expect("lock").push(record.clone());
            Ok(record)
        }

        fn list_labs(&self) -> Result<Vec<LabRecord>, RepositoryError> {
            Ok(self.labs.lock().expect("lock").clone())
        }
    }

    pub(super) fn build_service() -> (DeliveryService<MemoryRepository>, Arc<MemoryRepository>) {
        let repository = Arc::new(MemoryRepository::default());
        let service = DeliveryService::new(repository.clone(), QualityConfig::default());
        (service, repository)
    }

    pub(super) use MemoryRepository as Repository;
}

mod intake {
    use super::common::*;
    use bituguard::deliveries::{DeliveryServiceError, Verdict};

    #[test]
    fn receipt_and_lab_flow_end_to_end() {
        let (service, repository) = build_service();

        let receipt = service
            .save_receipt(submission(
                "TN-09-4521",
                "Himalaya Bitumen",
                "100",
                "97",
                date(2026, 1, 15),
            ))
            .expect("receipt stored");
        assert_eq!(receipt.loss_rupees, dec("165000.00"));
        assert_eq!(receipt.leakage_pct, dec("3.00"));

        let report = service
            .save_lab(lab(receipt.id, 60.0))
            .expect("lab stored");
        assert_eq!(report.verdict, Verdict::Pass);

        use bituguard::deliveries::DeliveryRepository;
        let stored = repository
            .fetch_receipt(receipt.id)
            .expect("repo fetch")
            .expect("record present");
        assert_eq!(stored, receipt);
    }

    #[test]
    fn lab_for_unknown_receipt_is_rejected() {
        let (service, _) = build_service();
        let result = service.save_lab(lab(bituguard::deliveries::ReceiptId(9), 60.0));
        assert!(matches!(
            result,
            Err(DeliveryServiceError::ReceiptNotFound(_))
        ));
    }
}

mod analytics {
    use super::common::*;
    use bituguard::deliveries::{AlertKind, RiskTier};

    #[test]
    fn leaky_deliveries_and_failing_labs_surface_in_alerts() {
        let (service, _) = build_service();

        let leaky = service
            .save_receipt(submission(
                "TN-1",
                "Apex Roadways",
                "100",
                "95",
                date(2026, 1, 5),
            ))
            .expect("receipt stored");
        for _ in 0..3 {
            // penetration 40 is below the VG30 window, a hard FAIL
            service.save_lab(lab(leaky.id, 40.0)).expect("lab stored");
        }

        let alerts = service.fraud_alerts().expect("alerts");
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, AlertKind::Leakage);
        assert!(alerts[0].message.contains("TN-1"));
        assert_eq!(alerts[1].kind, AlertKind::SupplierQualityRisk);
        assert_eq!(alerts[1].message, "Apex Roadways has 3 quality FAILs");
    }

    #[test]
    fn scorecard_and_monthly_summary_agree_with_stored_receipts() {
        let (service, _) = build_service();

        service
            .save_receipt(submission(
                "TN-1",
                "Apex Roadways",
                "100",
                "95",
                date(2026, 1, 5),
            ))
            .expect("receipt stored");
        service
            .save_receipt(submission(
                "TN-2",
                "apex roadways",
                "100",
                "99",
                date(2026, 1, 9),
            ))
            .expect("receipt stored");

        let scores = service.supplier_scorecard().expect("scorecard");
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].supplier, "Apex Roadways");
        assert_eq!(scores[0].tankers, 2);
        assert_eq!(scores[0].avg_leakage_pct, dec("3.00"));
        assert_eq!(scores[0].risk, RiskTier::Medium);

        let summary = service.monthly_loss(2026, 1).expect("summary");
        assert_eq!(summary.total_loss_rupees, dec("330000.00"));
        assert_eq!(summary.supplier_loss["Apex Roadways"], dec("330000.00"));
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use bituguard::deliveries::{delivery_router, DeliveryService, QualityConfig};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn build_router() -> axum::Router {
        let repository = Arc::new(Repository::default());
        let service = Arc::new(DeliveryService::new(repository, QualityConfig::default()));
        delivery_router(service)
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    #[tokio::test]
    async fn intake_then_export_through_the_router() {
        let router = build_router();

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/deliveries/receipts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "tanker_no": "TN-09-4521",
                    "grade": "VG30",
                    "quantity": 100,
                    "received_quantity": 96,
                    "supplier": "Himalaya Bitumen",
                    "receipt_date": "2026-01-15"
                })
                .to_string(),
            ))
            .expect("request");
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);
        let payload = json_body(response).await;
        assert_eq!(payload.get("receipt_id"), Some(&json!(1)));
        assert_eq!(payload.get("loss_rupees"), Some(&json!("220000.00")));

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/fraud/alerts")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(
            payload["alerts"].as_array().map(|alerts| alerts.len()),
            Some(1)
        );

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/audit/export?year=2026&month=1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let text = String::from_utf8(body.to_vec()).expect("utf-8");
        assert!(text.contains("TN-09-4521"));
    }
}
