use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::audit::render_audit_csv;
use super::domain::{LabCreatedView, LabSubmission, ReceiptCreatedView, ReceiptSubmission};
use super::repository::DeliveryRepository;
use super::service::{DeliveryService, DeliveryServiceError};

/// Router builder exposing the delivery tracking endpoints.
pub fn delivery_router<R>(service: Arc<DeliveryService<R>>) -> Router
where
    R: DeliveryRepository + 'static,
{
    Router::new()
        .route("/api/v1/deliveries/receipts", post(save_receipt_handler::<R>))
        .route("/api/v1/deliveries/labs", post(save_lab_handler::<R>))
        .route("/api/v1/fraud/alerts", get(fraud_alerts_handler::<R>))
        .route(
            "/api/v1/suppliers/scorecard",
            get(supplier_scorecard_handler::<R>),
        )
        .route(
            "/api/v1/analytics/loss/monthly",
            get(monthly_loss_handler::<R>),
        )
        .route("/api/v1/audit/export", get(audit_export_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct MonthQuery {
    pub(crate) year: i32,
    pub(crate) month: u32,
}

pub(crate) async fn save_receipt_handler<R>(
    State(service): State<Arc<DeliveryService<R>>>,
    axum::Json(submission): axum::Json<ReceiptSubmission>,
) -> Response
where
    R: DeliveryRepository + 'static,
{
    match service.save_receipt(submission) {
        Ok(record) => {
            let view = ReceiptCreatedView::from_record(&record);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn save_lab_handler<R>(
    State(service): State<Arc<DeliveryService<R>>>,
    axum::Json(submission): axum::Json<LabSubmission>,
) -> Response
where
    R: DeliveryRepository + 'static,
{
    match service.save_lab(submission) {
        Ok(record) => {
            let view = LabCreatedView::from_record(&record);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn fraud_alerts_handler<R>(
    State(service): State<Arc<DeliveryService<R>>>,
) -> Response
where
    R: DeliveryRepository + 'static,
{
    match service.fraud_alerts() {
        Ok(alerts) => (StatusCode::OK, axum::Json(json!({ "alerts": alerts }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn supplier_scorecard_handler<R>(
    State(service): State<Arc<DeliveryService<R>>>,
) -> Response
where
    R: DeliveryRepository + 'static,
{
    match service.supplier_scorecard() {
        Ok(scores) => (StatusCode::OK, axum::Json(scores)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn monthly_loss_handler<R>(
    State(service): State<Arc<DeliveryService<R>>>,
    Query(query): Query<MonthQuery>,
) -> Response
where
    R: DeliveryRepository + 'static,
{
    match service.monthly_loss(query.year, query.month) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn audit_export_handler<R>(
    State(service): State<Arc<DeliveryService<R>>>,
    Query(query): Query<MonthQuery>,
) -> Response
where
    R: DeliveryRepository + 'static,
{
    let rows = match service.audit_rows(query.year, query.month) {
        Ok(rows) => rows,
        Err(err) => return error_response(err),
    };

    match render_audit_csv(&rows) {
        Ok(document) => {
            let filename = format!("audit_{}_{}.csv", query.year, query.month);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                document,
            )
                .into_response()
        }
        Err(err) => {
            let payload = json!({ "error": format!("audit export failed: {err}") });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn error_response(err: DeliveryServiceError) -> Response {
    let status = match &err {
        DeliveryServiceError::Validation(_) | DeliveryServiceError::Measurement(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DeliveryServiceError::ReceiptNotFound(_) => StatusCode::NOT_FOUND,
        DeliveryServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
