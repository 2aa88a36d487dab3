use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use klima360::error::AppError;
use klima360::workflows::assessment::{ScoringPolicy, ScoringPolicyKind};
use klima360::workflows::enrollment::{enrollment_router, EnrollmentService, FarmerRepository};
use klima360::workflows::survey::{ScoredResponse, SurveyImporter};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct SurveyScoreRequest {
    /// Raw CSV export, header row included.
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SurveyScoreResponse<B> {
    pub(crate) policy: ScoringPolicyKind,
    pub(crate) responses: Vec<ScoredResponse<B>>,
}

pub(crate) fn with_enrollment_routes<R, P>(service: Arc<EnrollmentService<R, P>>) -> Router
where
    R: FarmerRepository<P::Band> + 'static,
    P: ScoringPolicy,
{
    let surveys = Router::new()
        .route("/api/v1/surveys/score", post(survey_score_endpoint::<R, P>))
        .with_state(service.clone());

    enrollment_router(service)
        .merge(surveys)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Batch-score an uploaded survey export with the deployment's policy and catalog.
pub(crate) async fn survey_score_endpoint<R, P>(
    State(service): State<Arc<EnrollmentService<R, P>>>,
    Json(payload): Json<SurveyScoreRequest>,
) -> Result<Json<SurveyScoreResponse<P::Band>>, AppError>
where
    R: FarmerRepository<P::Band> + 'static,
    P: ScoringPolicy,
{
    let responses = SurveyImporter::from_reader(Cursor::new(payload.csv.into_bytes()))?;
    let scored = SurveyImporter::score(&responses, service.engine(), service.catalog());

    Ok(Json(SurveyScoreResponse {
        policy: service.policy_kind(),
        responses: scored,
    }))
}
