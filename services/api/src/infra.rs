use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use klima360::error::AppError;
use klima360::workflows::assessment::{ProductCatalog, ScoreBand, ScoringPolicyKind};
use klima360::workflows::enrollment::{
    AgentId, Farmer, FarmerId, FarmerRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local farmer store. Contents are lost on restart.
pub(crate) struct InMemoryFarmerRepository<B> {
    records: Mutex<BTreeMap<FarmerId, Farmer<B>>>,
}

impl<B> Default for InMemoryFarmerRepository<B> {
    fn default() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<B> InMemoryFarmerRepository<B> {
    fn records(&self) -> Result<MutexGuard<'_, BTreeMap<FarmerId, Farmer<B>>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("farmer store lock poisoned".to_string()))
    }
}

impl<B: ScoreBand> FarmerRepository<B> for InMemoryFarmerRepository<B> {
    fn insert(&self, farmer: Farmer<B>) -> Result<Farmer<B>, RepositoryError> {
        let mut guard = self.records()?;
        if guard.contains_key(&farmer.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(farmer.id.clone(), farmer.clone());
        Ok(farmer)
    }

    fn update(&self, farmer: Farmer<B>) -> Result<(), RepositoryError> {
        let mut guard = self.records()?;
        if guard.contains_key(&farmer.id) {
            guard.insert(farmer.id.clone(), farmer);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &FarmerId) -> Result<Option<Farmer<B>>, RepositoryError> {
        Ok(self.records()?.get(id).cloned())
    }

    fn by_agent(&self, agent_id: &AgentId) -> Result<Vec<Farmer<B>>, RepositoryError> {
        Ok(self
            .records()?
            .values()
            .filter(|farmer| &farmer.agent_id == agent_id)
            .cloned()
            .collect())
    }
}

/// Catalog from `path` when configured, otherwise the standard bundles for the band scale.
pub(crate) fn load_catalog<B: ScoreBand>(
    path: Option<&Path>,
) -> Result<ProductCatalog<B>, AppError> {
    match path {
        Some(path) => {
            let catalog = ProductCatalog::from_path(path)?;
            info!(
                path = %path.display(),
                products = catalog.products().len(),
                "loaded product catalog"
            );
            Ok(catalog)
        }
        None => Ok(ProductCatalog::standard()),
    }
}

pub(crate) fn parse_policy(raw: &str) -> Result<ScoringPolicyKind, String> {
    raw.parse::<ScoringPolicyKind>().map_err(|err| err.to_string())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
