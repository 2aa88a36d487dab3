use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::domain::{AgentId, FarmerId, FarmerRegistration};
use super::repository::{FarmerRepository, RepositoryError};
use super::roster::{BandFilter, RosterQuery};
use super::service::{EnrollmentService, EnrollmentServiceError};
use crate::workflows::assessment::{AnswerSet, Category, ScoringPolicy};

/// Router builder exposing enrollment, assessment and reference-data endpoints.
pub fn enrollment_router<R, P>(service: Arc<EnrollmentService<R, P>>) -> Router
where
    R: FarmerRepository<P::Band> + 'static,
    P: ScoringPolicy,
{
    Router::new()
        .route("/api/v1/farmers", post(register_handler::<R, P>))
        .route("/api/v1/farmers/:farmer_id", get(farmer_handler::<R, P>))
        .route(
            "/api/v1/farmers/:farmer_id/assessment",
            post(assess_handler::<R, P>),
        )
        .route(
            "/api/v1/agents/:agent_id/farmers",
            get(roster_handler::<R, P>),
        )
        .route(
            "/api/v1/assessments/preview",
            post(preview_handler::<R, P>),
        )
        .route("/api/v1/questionnaire", get(questionnaire_handler))
        .route("/api/v1/products", get(products_handler::<R, P>))
        .with_state(service)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, axum::Json(payload)).into_response()
}

fn service_error_response(error: EnrollmentServiceError) -> Response {
    match error {
        EnrollmentServiceError::Registration(violation) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, violation.to_string())
        }
        EnrollmentServiceError::Repository(RepositoryError::NotFound) => {
            error_response(StatusCode::NOT_FOUND, "farmer not found")
        }
        EnrollmentServiceError::Repository(RepositoryError::Conflict) => {
            error_response(StatusCode::CONFLICT, "farmer already exists")
        }
        other => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) async fn register_handler<R, P>(
    State(service): State<Arc<EnrollmentService<R, P>>>,
    axum::Json(registration): axum::Json<FarmerRegistration>,
) -> Response
where
    R: FarmerRepository<P::Band> + 'static,
    P: ScoringPolicy,
{
    match service.register(registration, Local::now().date_naive()) {
        Ok(farmer) => (StatusCode::CREATED, axum::Json(farmer)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn farmer_handler<R, P>(
    State(service): State<Arc<EnrollmentService<R, P>>>,
    Path(farmer_id): Path<String>,
) -> Response
where
    R: FarmerRepository<P::Band> + 'static,
    P: ScoringPolicy,
{
    match service.get(&FarmerId(farmer_id)) {
        Ok(farmer) => (StatusCode::OK, axum::Json(farmer)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn assess_handler<R, P>(
    State(service): State<Arc<EnrollmentService<R, P>>>,
    Path(farmer_id): Path<String>,
    axum::Json(answers): axum::Json<AnswerSet>,
) -> Response
where
    R: FarmerRepository<P::Band> + 'static,
    P: ScoringPolicy,
{
    let id = FarmerId(farmer_id);
    match service.assess(&id, &answers, Local::now().date_naive()) {
        Ok(assessment) => {
            let payload = json!({
                "farmerId": id.0,
                "policy": service.policy_kind(),
                "assessment": assessment,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RosterParams {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    band: Option<String>,
    #[serde(default)]
    county: Option<String>,
}

pub(crate) async fn roster_handler<R, P>(
    State(service): State<Arc<EnrollmentService<R, P>>>,
    Path(agent_id): Path<String>,
    Query(params): Query<RosterParams>,
) -> Response
where
    R: FarmerRepository<P::Band> + 'static,
    P: ScoringPolicy,
{
    let band = match params.band.as_deref().map(BandFilter::parse) {
        None => BandFilter::All,
        Some(Ok(filter)) => filter,
        Some(Err(error)) => return error_response(StatusCode::BAD_REQUEST, error.to_string()),
    };
    let query = RosterQuery {
        search: params.search,
        band,
        county: params.county,
    };

    match service.roster(&AgentId(agent_id), &query) {
        Ok(roster) => (StatusCode::OK, axum::Json(roster)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn preview_handler<R, P>(
    State(service): State<Arc<EnrollmentService<R, P>>>,
    axum::Json(answers): axum::Json<AnswerSet>,
) -> Response
where
    R: FarmerRepository<P::Band> + 'static,
    P: ScoringPolicy,
{
    let preview = service.preview(&answers);
    (StatusCode::OK, axum::Json(preview)).into_response()
}

pub(crate) async fn questionnaire_handler() -> Response {
    let categories: Vec<_> = Category::ordered()
        .into_iter()
        .map(|category| {
            json!({
                "category": category,
                "label": category.label(),
                "questions": category.questions().collect::<Vec<_>>(),
            })
        })
        .collect();

    (StatusCode::OK, axum::Json(json!({ "categories": categories }))).into_response()
}

pub(crate) async fn products_handler<R, P>(
    State(service): State<Arc<EnrollmentService<R, P>>>,
) -> Response
where
    R: FarmerRepository<P::Band> + 'static,
    P: ScoringPolicy,
{
    let payload = json!({
        "policy": service.policy_kind(),
        "products": service.catalog(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
