use std::fmt::Debug;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::catalog::Bundle;

/// Ordered tier partitioning the 0-100 score range.
///
/// Each scoring policy owns exactly one implementation, so a score produced under one policy
/// can never be classified or matched against another policy's catalog.
pub trait ScoreBand:
    Copy + Eq + Ord + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// All tiers from lowest to highest score.
    fn ordered() -> &'static [Self];

    /// Classify a total score. Scores above 100 classify as the top tier.
    fn from_score(score: u8) -> Self;

    /// Wire name, identical to the serde representation.
    fn key(self) -> &'static str;

    fn label(self) -> &'static str;

    /// Default product bundle recommended for the tier.
    fn bundle(self) -> Bundle;

    fn from_key(raw: &str) -> Option<Self> {
        Self::ordered()
            .iter()
            .copied()
            .find(|band| band.key().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Three-tier band paired with the weighted-sum policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResilienceBand {
    Critical,
    Moderate,
    Strong,
}

impl ScoreBand for ResilienceBand {
    fn ordered() -> &'static [Self] {
        &[Self::Critical, Self::Moderate, Self::Strong]
    }

    fn from_score(score: u8) -> Self {
        match score {
            0..=40 => Self::Critical,
            41..=70 => Self::Moderate,
            _ => Self::Strong,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical Risk",
            Self::Moderate => "Moderate Risk",
            Self::Strong => "Strong Resilience",
        }
    }

    fn bundle(self) -> Bundle {
        match self {
            Self::Critical => Bundle {
                id: "critical-bundle",
                title: "Education + Climate Advisory + Savings Plan",
                description: "Comprehensive support package including climate education workshops, personalized advisory services, and guided savings plan to build financial resilience.",
            },
            Self::Moderate => Bundle {
                id: "moderate-bundle",
                title: "Insurance Bundle + Input Loan Offer",
                description: "Weather-indexed crop insurance combined with flexible input financing to protect against climate risks while improving productivity.",
            },
            Self::Strong => Bundle {
                id: "strong-bundle",
                title: "Credit Product + Productivity Kit",
                description: "Access to agricultural credit facilities and premium productivity enhancement tools for climate-resilient farming expansion.",
            },
        }
    }
}

/// Five-tier band paired with the category-average policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskTier {
    VeryCritical,
    Low,
    Moderate,
    Good,
    Excellent,
}

impl ScoreBand for RiskTier {
    fn ordered() -> &'static [Self] {
        &[
            Self::VeryCritical,
            Self::Low,
            Self::Moderate,
            Self::Good,
            Self::Excellent,
        ]
    }

    fn from_score(score: u8) -> Self {
        match score {
            0..=20 => Self::VeryCritical,
            21..=40 => Self::Low,
            41..=60 => Self::Moderate,
            61..=80 => Self::Good,
            _ => Self::Excellent,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::VeryCritical => "veryCritical",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::VeryCritical => "Very Critical",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    fn bundle(self) -> Bundle {
        match self {
            Self::VeryCritical => Bundle {
                id: "very-critical-bundle",
                title: "Climate Education + Intensive Advisory + Savings Plan",
                description: "Foundational climate education workshops, frequent one-on-one advisory visits, and a guided savings plan for households facing severe climate risk.",
            },
            Self::Low => Bundle {
                id: "low-bundle",
                title: "Climate Advisory + Group Savings",
                description: "Seasonal advisory services paired with group savings enrollment to start building a financial buffer against weather shocks.",
            },
            Self::Moderate => Bundle {
                id: "moderate-bundle",
                title: "Insurance Bundle + Input Loan Offer",
                description: "Weather-indexed crop insurance combined with flexible input financing to protect against climate risks while improving productivity.",
            },
            Self::Good => Bundle {
                id: "good-bundle",
                title: "Input Loan + Climate-Smart Inputs",
                description: "Input financing bundled with improved seed and water-harvesting kits to consolidate existing resilience practices.",
            },
            Self::Excellent => Bundle {
                id: "excellent-bundle",
                title: "Credit Product + Productivity Kit",
                description: "Access to agricultural credit facilities and premium productivity enhancement tools for climate-resilient farming expansion.",
            },
        }
    }
}
