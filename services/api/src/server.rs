use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryDeliveryRepository};
use crate::routes::with_delivery_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use bituguard::config::AppConfig;
use bituguard::deliveries::{DeliveryService, QualityConfig};
use bituguard::error::AppError;
use bituguard::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryDeliveryRepository::default());
    let delivery_service = Arc::new(DeliveryService::new(repository, QualityConfig::default()));

    let app = with_delivery_routes(delivery_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "delivery tracking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
