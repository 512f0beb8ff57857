use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_risk_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use medcare::config::AppConfig;
use medcare::error::AppError;
use medcare::risk::{InMemoryHistory, RiskAssessmentService, RiskEngine};
use medcare::telemetry;
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
    let engine = Arc::new(RiskEngine::new(config.engine));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: engine.clone(),
    };

    let history = Arc::new(InMemoryHistory::with_capacity(config.history.capacity));
    let risk_service = Arc::new(RiskAssessmentService::with_engine(engine, history));

    let app = with_risk_routes(risk_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        clinical_overlay = config.engine.clinical_overlay,
        model_calibration = config.engine.model_calibration,
        default_model = %config.engine.default_model,
        history_capacity = config.history.capacity,
        "diabetes risk service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
