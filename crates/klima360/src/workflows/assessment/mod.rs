//! Climate-resilience assessment: the questionnaire table, scoring policies, band taxonomy,
//! and the band-keyed product catalog.

pub mod bands;
pub mod catalog;
mod draft;
pub mod questionnaire;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use bands::{ResilienceBand, RiskTier, ScoreBand};
pub use catalog::{CatalogError, Product, ProductCatalog};
pub use draft::{QuestionnaireDraft, QuestionnaireError};
pub use questionnaire::{
    AnswerSet, Category, Polarity, Question, QuestionSpec, QUESTIONNAIRE, QUESTION_COUNT,
};
pub use scoring::{
    CategoryAverage, CategoryScores, ClimateScoreResult, ScoringEngine, ScoringPolicy,
    ScoringPolicyKind, WeightedSum,
};
