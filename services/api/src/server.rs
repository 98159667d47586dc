use crate::cli::ServeArgs;
use crate::infra::{AppState, LedgerState};
use crate::routes::with_ledger_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use staff_ledger::api::{HttpStaffApi, StaffApi};
use staff_ledger::config::AppConfig;
use staff_ledger::error::AppError;
use staff_ledger::telemetry;
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

    let api: Arc<dyn StaffApi> = Arc::new(HttpStaffApi::new(&config.upstream));
    let ledger = LedgerState {
        api,
        page_size: config.report.page_size,
    };

    let app = with_ledger_routes(ledger)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        upstream = %config.upstream.base_url,
        "staff contributions service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
