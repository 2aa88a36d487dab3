mod policy;
mod rules;

pub use policy::{
    CategoryAverage, ScoringPolicy, ScoringPolicyKind, UnknownScoringPolicy, WeightedSum,
};
pub use rules::CategoryTallies;

use super::bands::ScoreBand;
use super::questionnaire::{AnswerSet, Category};
use serde::{Deserialize, Serialize};

/// Stateless engine applying one scoring policy to complete answer sets.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine<P> {
    policy: P,
}

impl<P: ScoringPolicy> ScoringEngine<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn score(&self, answers: &AnswerSet) -> ClimateScoreResult<P::Band> {
        let tallies = CategoryTallies::from_answers(answers);
        let category_scores = tallies.percentages();
        let total_score = self.policy.total_score(&tallies, &category_scores);

        ClimateScoreResult {
            total_score,
            score_band: P::Band::from_score(total_score),
            category_scores,
        }
    }
}

/// Per-category percentages, each rounded independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub exposure: u8,
    pub sensitivity: u8,
    pub adaptive_capacity: u8,
    pub mitigation_practices: u8,
    pub financial_resilience: u8,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Exposure => self.exposure,
            Category::Sensitivity => self.sensitivity,
            Category::AdaptiveCapacity => self.adaptive_capacity,
            Category::MitigationPractices => self.mitigation_practices,
            Category::FinancialResilience => self.financial_resilience,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u8)> + '_ {
        Category::ordered()
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

/// Outcome of one scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateScoreResult<B> {
    pub total_score: u8,
    pub score_band: B,
    pub category_scores: CategoryScores,
}
