use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::assessment::{AnswerSet, CategoryAverage, RiskTier, ScoreBand};
use crate::workflows::enrollment::domain::{
    AgentId, Farmer, FarmerId, FarmerRegistration, FarmingType, GpsCoordinates,
};
use crate::workflows::enrollment::repository::{FarmerRepository, RepositoryError};
use crate::workflows::enrollment::{enrollment_router, EnrollmentService};

pub(super) fn enrollment_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

pub(super) fn assessment_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 2).expect("valid date")
}

pub(super) fn registration() -> FarmerRegistration {
    FarmerRegistration {
        name: "Wanjiku Kamau".to_string(),
        phone: "+254712345678".to_string(),
        county: "Nakuru".to_string(),
        sub_county: Some("Njoro".to_string()),
        village: "Mau Narok".to_string(),
        gps_coordinates: Some(GpsCoordinates {
            latitude: -0.6103,
            longitude: 35.9372,
        }),
        farm_size: 2.5,
        farming_type: FarmingType::Mixed,
        main_crops: vec!["Maize".to_string(), "Beans".to_string()],
        agent_id: AgentId("agent-001".to_string()),
        agent_name: "Peter Otieno".to_string(),
        date_enrolled: None,
    }
}

pub(super) fn registration_for(
    name: &str,
    village: &str,
    county: &str,
    phone: &str,
    agent: &str,
) -> FarmerRegistration {
    FarmerRegistration {
        name: name.to_string(),
        phone: phone.to_string(),
        county: county.to_string(),
        village: village.to_string(),
        agent_id: AgentId(agent.to_string()),
        ..registration()
    }
}

/// Counts in table order per category; see the assessment fixtures.
pub(super) fn answers_with_counts(counts: [u8; 5]) -> AnswerSet {
    use crate::workflows::assessment::Category;

    let mut answers = AnswerSet::all_unfavorable();
    for (category, count) in Category::ordered().into_iter().zip(counts) {
        for spec in category.questions().take(count as usize) {
            answers = answers.with(spec.question, spec.polarity.favorable_answer());
        }
    }
    answers
}

pub(super) type AverageService = EnrollmentService<MemoryRepository<RiskTier>, CategoryAverage>;

pub(super) fn build_service() -> (AverageService, Arc<MemoryRepository<RiskTier>>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = EnrollmentService::with_standard_catalog(repository.clone());
    (service, repository)
}

pub(super) struct MemoryRepository<B> {
    pub(super) records: Mutex<BTreeMap<FarmerId, Farmer<B>>>,
}

impl<B> Default for MemoryRepository<B> {
    fn default() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<B: ScoreBand> FarmerRepository<B> for MemoryRepository<B> {
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
        if !guard.contains_key(&farmer.id) {
            return Err(RepositoryError::NotFound);
        }
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

pub(super) struct ConflictRepository;

impl FarmerRepository<RiskTier> for ConflictRepository {
    fn insert(&self, _farmer: Farmer<RiskTier>) -> Result<Farmer<RiskTier>, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _farmer: Farmer<RiskTier>) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &FarmerId) -> Result<Option<Farmer<RiskTier>>, RepositoryError> {
        Ok(None)
    }

    fn by_agent(&self, _agent_id: &AgentId) -> Result<Vec<Farmer<RiskTier>>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl FarmerRepository<RiskTier> for UnavailableRepository {
    fn insert(&self, _farmer: Farmer<RiskTier>) -> Result<Farmer<RiskTier>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _farmer: Farmer<RiskTier>) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &FarmerId) -> Result<Option<Farmer<RiskTier>>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn by_agent(&self, _agent_id: &AgentId) -> Result<Vec<Farmer<RiskTier>>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: AverageService) -> axum::Router {
    enrollment_router(Arc::new(service))
}
