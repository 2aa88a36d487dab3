//! End-to-end scenarios through the public enrollment service and HTTP router: register a
//! farmer, walk the questionnaire, persist the assessment, and read it back from the roster.

mod common {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use klima360::workflows::enrollment::{
        AgentId, Farmer, FarmerId, FarmerRegistration, FarmerRepository, FarmingType,
        RepositoryError,
    };

    pub(super) fn registration(name: &str, agent: &str) -> FarmerRegistration {
        FarmerRegistration {
            name: name.to_string(),
            phone: "+254700111222".to_string(),
            county: "Kisumu".to_string(),
            sub_county: None,
            village: "Ahero".to_string(),
            gps_coordinates: None,
            farm_size: 1.2,
            farming_type: FarmingType::Crop,
            main_crops: vec!["Rice".to_string()],
            agent_id: AgentId(agent.to_string()),
            agent_name: "Field Agent".to_string(),
            date_enrolled: None,
        }
    }

    pub(super) struct InMemoryFarmers<B> {
        records: Mutex<BTreeMap<FarmerId, Farmer<B>>>,
    }

    impl<B> Default for InMemoryFarmers<B> {
        fn default() -> Self {
            Self {
                records: Mutex::new(BTreeMap::new()),
            }
        }
    }

    impl<B: Clone + Send> FarmerRepository<B> for InMemoryFarmers<B> {
        fn insert(&self, farmer: Farmer<B>) -> Result<Farmer<B>, RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            if guard.contains_key(&farmer.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(farmer.id.clone(), farmer.clone());
            Ok(farmer)
        }

        fn update(&self, farmer: Farmer<B>) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            guard.insert(farmer.id.clone(), farmer);
            Ok(())
        }

        fn fetch(&self, id: &FarmerId) -> Result<Option<Farmer<B>>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.get(id).cloned())
        }

        fn by_agent(&self, agent_id: &AgentId) -> Result<Vec<Farmer<B>>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard
                .values()
                .filter(|farmer| &farmer.agent_id == agent_id)
                .cloned()
                .collect())
        }
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use tower::ServiceExt;

use common::{registration, InMemoryFarmers};
use klima360::workflows::assessment::{
    AnswerSet, Category, CategoryAverage, Question, QuestionnaireDraft, ResilienceBand, RiskTier,
    WeightedSum,
};
use klima360::workflows::enrollment::{
    enrollment_router, AgentId, BandFilter, EnrollmentService, RosterQuery,
};

fn day(month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, date).expect("valid date")
}

#[test]
fn questionnaire_draft_feeds_assessment() {
    let repository = Arc::new(InMemoryFarmers::<RiskTier>::default());
    let service: EnrollmentService<_, CategoryAverage> =
        EnrollmentService::with_standard_catalog(repository);
    let farmer = service
        .register(registration("Achieng Odhiambo", "agent-kis"), day(5, 1))
        .expect("registers");

    let mut draft = QuestionnaireDraft::new();
    for category in Category::ordered() {
        assert_eq!(draft.next_incomplete_category(), Some(category));
        for spec in category.questions() {
            draft.record(spec.question, spec.polarity.favorable_answer());
        }
        assert!(draft.can_advance(category));
    }
    draft.record(Question::DroughtFrequency, true);
    let answers = draft.finish().expect("draft complete");

    let assessment = service
        .assess(&farmer.id, &answers, day(5, 3))
        .expect("assessment succeeds");

    assert_eq!(assessment.category_scores.exposure, 75);
    assert_eq!(assessment.climate_score, 95);
    assert_eq!(assessment.score_band, RiskTier::Excellent);
    assert_eq!(assessment.matched_product.id, "excellent-bundle");

    let roster = service
        .roster(
            &AgentId("agent-kis".to_string()),
            &RosterQuery {
                band: BandFilter::Band(RiskTier::Excellent),
                ..RosterQuery::default()
            },
        )
        .expect("roster loads");
    assert_eq!(roster.farmers.len(), 1);
    assert_eq!(roster.summary.assessed, 1);
}

#[test]
fn weighted_sum_deployment_bands_on_three_tiers() {
    let repository = Arc::new(InMemoryFarmers::<ResilienceBand>::default());
    let service: EnrollmentService<_, WeightedSum> =
        EnrollmentService::with_standard_catalog(repository);
    let farmer = service
        .register(registration("Otieno Were", "agent-kis"), day(5, 1))
        .expect("registers");

    let low = service
        .assess(&farmer.id, &AnswerSet::all_unfavorable(), day(5, 2))
        .expect("assessment succeeds");
    assert_eq!(low.score_band, ResilienceBand::Critical);
    assert_eq!(low.matched_product.id, "critical-bundle");

    let high = service
        .assess(&farmer.id, &AnswerSet::all_favorable(), day(6, 2))
        .expect("assessment succeeds");
    assert_eq!(high.climate_score, 100);
    assert_eq!(high.score_band, ResilienceBand::Strong);

    let stored = service.get(&farmer.id).expect("farmer exists");
    assert_eq!(stored.assessment.map(|a| a.assessed_on), Some(day(6, 2)));
}

#[tokio::test]
async fn router_registers_assesses_and_lists() {
    let repository = Arc::new(InMemoryFarmers::<RiskTier>::default());
    let service: Arc<EnrollmentService<_, CategoryAverage>> =
        Arc::new(EnrollmentService::with_standard_catalog(repository));
    let router = enrollment_router(service);

    let body = serde_json::to_vec(&registration("Njeri Mwangi", "agent-http"))
        .expect("registration serializes");
    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/farmers")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let farmer: serde_json::Value = serde_json::from_slice(&bytes).expect("json payload");
    let farmer_id = farmer["id"].as_str().expect("farmer id").to_string();

    let answers = serde_json::to_vec(&AnswerSet::all_unfavorable()).expect("answers serialize");
    let response = router
        .clone()
        .oneshot(
            Request::post(format!("/api/v1/farmers/{farmer_id}/assessment"))
                .header("content-type", "application/json")
                .body(Body::from(answers))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::get("/api/v1/agents/agent-http/farmers?band=veryCritical&search=njeri")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let roster: serde_json::Value = serde_json::from_slice(&bytes).expect("json payload");
    assert_eq!(roster["agentId"], serde_json::json!("agent-http"));
    assert_eq!(roster["farmers"][0]["id"], serde_json::json!(farmer_id));
    assert_eq!(
        roster["farmers"][0]["assessment"]["matchedProduct"]["id"],
        serde_json::json!("very-critical-bundle")
    );
}
