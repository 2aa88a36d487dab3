use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::assessment::{CategoryScores, Product};

/// Identifier wrapper for enrolled farmers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FarmerId(pub String);

/// Field agent responsible for a farmer. Supplied by the caller, never authenticated here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FarmingType {
    Crop,
    Livestock,
    Mixed,
}

impl FarmingType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Crop => "Crop Farming",
            Self::Livestock => "Livestock",
            Self::Mixed => "Mixed Farming",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Registration form captured by a field agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerRegistration {
    pub name: String,
    pub phone: String,
    pub county: String,
    #[serde(default)]
    pub sub_county: Option<String>,
    pub village: String,
    #[serde(default)]
    pub gps_coordinates: Option<GpsCoordinates>,
    /// Acres under cultivation or grazing.
    pub farm_size: f64,
    pub farming_type: FarmingType,
    #[serde(default)]
    pub main_crops: Vec<String>,
    pub agent_id: AgentId,
    pub agent_name: String,
    /// Defaults to the registration day when omitted.
    #[serde(default)]
    pub date_enrolled: Option<NaiveDate>,
}

/// Outcome of the latest questionnaire. Score, band and product are only ever written together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerAssessment<B> {
    pub climate_score: u8,
    pub score_band: B,
    pub matched_product: Product<B>,
    pub category_scores: CategoryScores,
    pub assessed_on: NaiveDate,
}

/// Enrolled farmer as held by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farmer<B> {
    pub id: FarmerId,
    pub name: String,
    pub phone: String,
    pub county: String,
    pub sub_county: Option<String>,
    pub village: String,
    pub gps_coordinates: Option<GpsCoordinates>,
    pub farm_size: f64,
    pub farming_type: FarmingType,
    pub main_crops: Vec<String>,
    pub date_enrolled: NaiveDate,
    pub agent_id: AgentId,
    pub agent_name: String,
    pub assessment: Option<FarmerAssessment<B>>,
}

impl<B: Copy> Farmer<B> {
    pub fn is_assessed(&self) -> bool {
        self.assessment.is_some()
    }

    pub fn climate_score(&self) -> Option<u8> {
        self.assessment.as_ref().map(|assessment| assessment.climate_score)
    }

    pub fn score_band(&self) -> Option<B> {
        self.assessment.as_ref().map(|assessment| assessment.score_band)
    }
}
