//! Farmer enrollment: registration, per-agent rosters, and persisting assessments produced by
//! the scoring engine.

pub mod domain;
pub(crate) mod registration;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AgentId, Farmer, FarmerAssessment, FarmerId, FarmerRegistration, FarmingType, GpsCoordinates,
};
pub use registration::RegistrationViolation;
pub use repository::{FarmerRepository, RepositoryError};
pub use roster::{AgentRoster, BandFilter, RosterQuery, RosterSummary, UnknownBandFilter};
pub use router::enrollment_router;
pub use service::{AssessmentPreview, EnrollmentService, EnrollmentServiceError};
