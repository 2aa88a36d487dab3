use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryFarmerRepository};
use crate::routes::with_enrollment_routes;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayer;
use klima360::config::{AppConfig, ScoringConfig};
use klima360::error::AppError;
use klima360::telemetry;
use klima360::workflows::assessment::{
    CategoryAverage, ScoringPolicy, ScoringPolicyKind, WeightedSum,
};
use klima360::workflows::enrollment::EnrollmentService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

/// Routes for the configured policy. The band type follows the policy, so the two scales
/// cannot meet inside one process.
fn enrollment_app(scoring: &ScoringConfig) -> Result<Router, AppError> {
    match scoring.policy {
        ScoringPolicyKind::WeightedSum => policy_app::<WeightedSum>(scoring),
        ScoringPolicyKind::CategoryAverage => policy_app::<CategoryAverage>(scoring),
    }
}

fn policy_app<P: ScoringPolicy>(scoring: &ScoringConfig) -> Result<Router, AppError> {
    let catalog = load_catalog::<P::Band>(scoring.catalog_path.as_deref())?;
    let repository = Arc::new(InMemoryFarmerRepository::<P::Band>::default());
    let service = Arc::new(EnrollmentService::new(repository, P::default(), catalog));
    Ok(with_enrollment_routes(service))
}

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(policy) = args.policy.take() {
        config.scoring.policy = policy;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = enrollment_app(&config.scoring)?
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        policy = %config.scoring.policy,
        %addr,
        "klima360 enrollment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
