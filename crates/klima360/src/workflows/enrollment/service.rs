use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{AgentId, Farmer, FarmerAssessment, FarmerId, FarmerRegistration};
use super::registration::{farmer_from_registration, RegistrationViolation};
use super::repository::{FarmerRepository, RepositoryError};
use super::roster::{AgentRoster, RosterQuery};
use crate::workflows::assessment::{
    AnswerSet, ClimateScoreResult, Product, ProductCatalog, ScoreBand, ScoringEngine,
    ScoringPolicy, ScoringPolicyKind,
};

/// Service composing registration checks, the repository, the scoring engine and the catalog.
pub struct EnrollmentService<R, P: ScoringPolicy> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine<P>>,
    catalog: Arc<ProductCatalog<P::Band>>,
}

static FARMER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_farmer_id() -> FarmerId {
    let id = FARMER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    FarmerId(format!("farmer-{id:06}"))
}

/// Stateless scoring outcome together with the product it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentPreview<B> {
    #[serde(flatten)]
    pub result: ClimateScoreResult<B>,
    pub matched_product: Product<B>,
}

impl<R, P> EnrollmentService<R, P>
where
    R: FarmerRepository<P::Band> + 'static,
    P: ScoringPolicy,
{
    pub fn new(repository: Arc<R>, policy: P, catalog: ProductCatalog<P::Band>) -> Self {
        let missing: Vec<&'static str> = catalog
            .missing_bands()
            .into_iter()
            .map(|band| band.key())
            .collect();
        if !missing.is_empty() {
            let fallback = catalog.fallback();
            warn!(
                policy = %P::KIND,
                missing = ?missing,
                fallback = %fallback.id,
                "product catalog does not cover every band; unmatched bands use the first product"
            );
        }

        Self {
            repository,
            engine: Arc::new(ScoringEngine::new(policy)),
            catalog: Arc::new(catalog),
        }
    }

    pub fn with_standard_catalog(repository: Arc<R>) -> Self {
        Self::new(repository, P::default(), ProductCatalog::standard())
    }

    pub fn policy_kind(&self) -> ScoringPolicyKind {
        P::KIND
    }

    pub fn engine(&self) -> &ScoringEngine<P> {
        &self.engine
    }

    pub fn catalog(&self) -> &ProductCatalog<P::Band> {
        &self.catalog
    }

    /// Validate and store a new farmer. `today` stands in for a missing enrollment date.
    pub fn register(
        &self,
        registration: FarmerRegistration,
        today: NaiveDate,
    ) -> Result<Farmer<P::Band>, EnrollmentServiceError> {
        let farmer = farmer_from_registration(registration, next_farmer_id(), today)?;
        let stored = self.repository.insert(farmer)?;

        info!(
            farmer_id = %stored.id.0,
            agent_id = %stored.agent_id.0,
            county = %stored.county,
            "farmer registered"
        );
        Ok(stored)
    }

    /// Score a complete questionnaire without touching the repository.
    pub fn preview(&self, answers: &AnswerSet) -> AssessmentPreview<P::Band> {
        let result = self.engine.score(answers);
        let matched_product = self.catalog.lookup(result.score_band).clone();
        AssessmentPreview {
            result,
            matched_product,
        }
    }

    /// Score a farmer's questionnaire and replace any earlier assessment.
    pub fn assess(
        &self,
        farmer_id: &FarmerId,
        answers: &AnswerSet,
        assessed_on: NaiveDate,
    ) -> Result<FarmerAssessment<P::Band>, EnrollmentServiceError> {
        let mut farmer = self
            .repository
            .fetch(farmer_id)?
            .ok_or(RepositoryError::NotFound)?;

        let preview = self.preview(answers);
        if preview.matched_product.score_band != preview.result.score_band {
            debug!(
                farmer_id = %farmer_id.0,
                band = preview.result.score_band.key(),
                product = %preview.matched_product.id,
                "no catalog entry for band, using fallback product"
            );
        }

        let assessment = FarmerAssessment {
            climate_score: preview.result.total_score,
            score_band: preview.result.score_band,
            matched_product: preview.matched_product,
            category_scores: preview.result.category_scores,
            assessed_on,
        };
        let replaced = farmer.assessment.replace(assessment.clone()).is_some();
        self.repository.update(farmer)?;

        info!(
            farmer_id = %farmer_id.0,
            policy = %P::KIND,
            score = assessment.climate_score,
            band = assessment.score_band.key(),
            product = %assessment.matched_product.id,
            reassessed = replaced,
            "farmer assessed"
        );
        Ok(assessment)
    }

    /// Fetch a farmer for API responses.
    pub fn get(&self, farmer_id: &FarmerId) -> Result<Farmer<P::Band>, EnrollmentServiceError> {
        let farmer = self
            .repository
            .fetch(farmer_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(farmer)
    }

    pub fn roster(
        &self,
        agent_id: &AgentId,
        query: &RosterQuery<P::Band>,
    ) -> Result<AgentRoster<P::Band>, EnrollmentServiceError> {
        let farmers = self.repository.by_agent(agent_id)?;
        Ok(AgentRoster::build(agent_id.clone(), farmers, query))
    }
}

/// Error raised by the enrollment service.
#[derive(Debug, thiserror::Error)]
pub enum EnrollmentServiceError {
    #[error(transparent)]
    Registration(#[from] RegistrationViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
