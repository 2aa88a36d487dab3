use super::domain::{AgentId, Farmer, FarmerId};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Updates overwrite the whole record; the last write wins.
pub trait FarmerRepository<B>: Send + Sync {
    fn insert(&self, farmer: Farmer<B>) -> Result<Farmer<B>, RepositoryError>;
    fn update(&self, farmer: Farmer<B>) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &FarmerId) -> Result<Option<Farmer<B>>, RepositoryError>;
    fn by_agent(&self, agent_id: &AgentId) -> Result<Vec<Farmer<B>>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("farmer already exists")]
    Conflict,
    #[error("farmer not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
