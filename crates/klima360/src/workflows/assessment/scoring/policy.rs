use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::super::bands::{ResilienceBand, RiskTier, ScoreBand};
use super::rules::{round_div, CategoryTallies};
use super::CategoryScores;

/// Normalization formula together with the band enumeration it classifies into.
pub trait ScoringPolicy: Default + Send + Sync + 'static {
    type Band: ScoreBand;

    const KIND: ScoringPolicyKind;

    /// Total score in `0..=100`.
    fn total_score(&self, tallies: &CategoryTallies, percentages: &CategoryScores) -> u8;
}

/// Weighted raw-count sum normalized by the fixed constant 23.
///
/// Exposure contributes `(4 - hazards) * 3`; every other category contributes its favorable
/// count times 4. Because the weighted ceiling (88) exceeds the normalizer, the raw result can
/// pass 100 and is clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightedSum;

const EXPOSURE_WEIGHT: u32 = 3;
const CATEGORY_WEIGHT: u32 = 4;
const WEIGHTED_NORMALIZER: u32 = 23;

impl ScoringPolicy for WeightedSum {
    type Band = ResilienceBand;

    const KIND: ScoringPolicyKind = ScoringPolicyKind::WeightedSum;

    fn total_score(&self, tallies: &CategoryTallies, _percentages: &CategoryScores) -> u8 {
        let weighted = u32::from(tallies.exposure) * EXPOSURE_WEIGHT
            + (u32::from(tallies.sensitivity)
                + u32::from(tallies.adaptive_capacity)
                + u32::from(tallies.mitigation_practices)
                + u32::from(tallies.financial_resilience))
                * CATEGORY_WEIGHT;

        round_div(weighted * 100, WEIGHTED_NORMALIZER).min(100) as u8
    }
}

/// Unweighted mean of the five category percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryAverage;

impl ScoringPolicy for CategoryAverage {
    type Band = RiskTier;

    const KIND: ScoringPolicyKind = ScoringPolicyKind::CategoryAverage;

    fn total_score(&self, _tallies: &CategoryTallies, percentages: &CategoryScores) -> u8 {
        let sum: u32 = percentages.iter().map(|(_, pct)| u32::from(pct)).sum();
        round_div(sum, 5).min(100) as u8
    }
}

/// Runtime selector for the system-wide policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicyKind {
    WeightedSum,
    #[default]
    CategoryAverage,
}

impl ScoringPolicyKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WeightedSum => "weighted_sum",
            Self::CategoryAverage => "category_average",
        }
    }
}

impl fmt::Display for ScoringPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scoring policy '{0}' (expected weighted_sum or category_average)")]
pub struct UnknownScoringPolicy(pub String);

impl FromStr for ScoringPolicyKind {
    type Err = UnknownScoringPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "weighted_sum" | "weighted" | "three_band" => Ok(Self::WeightedSum),
            "category_average" | "average" | "five_band" => Ok(Self::CategoryAverage),
            _ => Err(UnknownScoringPolicy(value.to_string())),
        }
    }
}
