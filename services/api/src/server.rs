use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAssessmentStore};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use vaccine_screen::config::AppConfig;
use vaccine_screen::error::AppError;
use vaccine_screen::telemetry;
use vaccine_screen::workflows::assessment::AssessmentService;

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryAssessmentStore::default());
    let service = Arc::new(AssessmentService::new(store, config.eligibility.clone()));

    let app = with_assessment_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        rule_table = ?config.eligibility.rule_table,
        %addr,
        "vaccine screening service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
