use serde::{Deserialize, Serialize};

/// The five fixed question groupings. Declaration order is the questionnaire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Exposure,
    Sensitivity,
    AdaptiveCapacity,
    MitigationPractices,
    FinancialResilience,
}

impl Category {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Exposure,
            Self::Sensitivity,
            Self::AdaptiveCapacity,
            Self::MitigationPractices,
            Self::FinancialResilience,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Exposure => "Exposure",
            Self::Sensitivity => "Sensitivity",
            Self::AdaptiveCapacity => "Adaptive Capacity",
            Self::MitigationPractices => "Mitigation Practices",
            Self::FinancialResilience => "Financial Resilience",
        }
    }

    /// Number of questions in the category; the normalization denominator for its percentage.
    pub const fn question_count(self) -> u8 {
        match self {
            Self::Exposure | Self::Sensitivity => 4,
            Self::AdaptiveCapacity | Self::MitigationPractices | Self::FinancialResilience => 5,
        }
    }

    pub fn questions(self) -> impl Iterator<Item = &'static QuestionSpec> {
        QUESTIONNAIRE
            .iter()
            .filter(move |spec| spec.category == self)
    }
}

/// Which answer counts in the farmer's favor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// "Yes" signals resilience (e.g. access to savings).
    Protective,
    /// "Yes" signals risk (e.g. recurring drought).
    Hazard,
}

impl Polarity {
    pub const fn favorable_answer(self) -> bool {
        matches!(self, Self::Protective)
    }

    pub const fn is_favorable(self, answer: bool) -> bool {
        answer == self.favorable_answer()
    }
}

/// One of the 23 yes/no questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Question {
    DroughtFrequency,
    FloodingRisk,
    TemperatureExtremes,
    RainfallVariability,
    SoilDegradation,
    WaterScarcity,
    PestDisease,
    CropDiversity,
    WeatherInfo,
    AlternativeIncome,
    MarketAccess,
    TrainingAccess,
    CommunitySupport,
    SoilConservation,
    WaterHarvesting,
    Agroforestry,
    OrganicPractices,
    ClimateSmartSeeds,
    SavingsAccess,
    CreditAccess,
    InsuranceAccess,
    CooperativeMember,
    RecordKeeping,
}

pub const QUESTION_COUNT: usize = 23;

impl Question {
    pub const ALL: [Question; QUESTION_COUNT] = [
        Question::DroughtFrequency,
        Question::FloodingRisk,
        Question::TemperatureExtremes,
        Question::RainfallVariability,
        Question::SoilDegradation,
        Question::WaterScarcity,
        Question::PestDisease,
        Question::CropDiversity,
        Question::WeatherInfo,
        Question::AlternativeIncome,
        Question::MarketAccess,
        Question::TrainingAccess,
        Question::CommunitySupport,
        Question::SoilConservation,
        Question::WaterHarvesting,
        Question::Agroforestry,
        Question::OrganicPractices,
        Question::ClimateSmartSeeds,
        Question::SavingsAccess,
        Question::CreditAccess,
        Question::InsuranceAccess,
        Question::CooperativeMember,
        Question::RecordKeeping,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static QuestionSpec {
        &QUESTIONNAIRE[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    pub fn category(self) -> Category {
        self.spec().category
    }

    pub fn polarity(self) -> Polarity {
        self.spec().polarity
    }

    pub fn from_key(key: &str) -> Option<Self> {
        QUESTIONNAIRE
            .iter()
            .find(|spec| spec.key == key)
            .map(|spec| spec.question)
    }
}

/// Row of the questionnaire table. The table is the single source of category membership and
/// polarity; scoring never branches on individual questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionSpec {
    pub question: Question,
    pub key: &'static str,
    pub category: Category,
    pub polarity: Polarity,
    pub prompt: &'static str,
}

const fn row(
    question: Question,
    key: &'static str,
    category: Category,
    polarity: Polarity,
    prompt: &'static str,
) -> QuestionSpec {
    QuestionSpec {
        question,
        key,
        category,
        polarity,
        prompt,
    }
}

use Category::{AdaptiveCapacity, Exposure, FinancialResilience, MitigationPractices, Sensitivity};
use Polarity::{Hazard, Protective};

/// Indexed by `Question as usize`.
pub static QUESTIONNAIRE: [QuestionSpec; QUESTION_COUNT] = [
    // Exposure
    row(
        Question::DroughtFrequency,
        "droughtFrequency",
        Exposure,
        Hazard,
        "Has the farm experienced drought in the past 3 years?",
    ),
    row(
        Question::FloodingRisk,
        "floodingRisk",
        Exposure,
        Hazard,
        "Is the farm located in a flood-prone area?",
    ),
    row(
        Question::TemperatureExtremes,
        "temperatureExtremes",
        Exposure,
        Hazard,
        "Have you noticed more extreme temperatures recently?",
    ),
    row(
        Question::RainfallVariability,
        "rainfallVariability",
        Exposure,
        Hazard,
        "Has rainfall become more unpredictable in your area?",
    ),
    // Sensitivity
    row(
        Question::SoilDegradation,
        "soilDegradation",
        Sensitivity,
        Hazard,
        "Is soil erosion or degradation a problem on your farm?",
    ),
    row(
        Question::WaterScarcity,
        "waterScarcity",
        Sensitivity,
        Hazard,
        "Do you face water shortage during dry seasons?",
    ),
    row(
        Question::PestDisease,
        "pestDisease",
        Sensitivity,
        Hazard,
        "Have pest and disease problems increased recently?",
    ),
    row(
        Question::CropDiversity,
        "cropDiversity",
        Sensitivity,
        Protective,
        "Do you grow multiple types of crops?",
    ),
    // Adaptive capacity
    row(
        Question::WeatherInfo,
        "weatherInfo",
        AdaptiveCapacity,
        Protective,
        "Do you have access to weather forecasts and advisories?",
    ),
    row(
        Question::AlternativeIncome,
        "alternativeIncome",
        AdaptiveCapacity,
        Protective,
        "Do you have income sources other than farming?",
    ),
    row(
        Question::MarketAccess,
        "marketAccess",
        AdaptiveCapacity,
        Protective,
        "Do you have good access to markets for your products?",
    ),
    row(
        Question::TrainingAccess,
        "trainingAccess",
        AdaptiveCapacity,
        Protective,
        "Have you received agricultural training in the past 2 years?",
    ),
    row(
        Question::CommunitySupport,
        "communitySupport",
        AdaptiveCapacity,
        Protective,
        "Is there strong community support for farming in your area?",
    ),
    // Mitigation practices
    row(
        Question::SoilConservation,
        "soilConservation",
        MitigationPractices,
        Protective,
        "Do you practice soil conservation techniques?",
    ),
    row(
        Question::WaterHarvesting,
        "waterHarvesting",
        MitigationPractices,
        Protective,
        "Do you harvest and store rainwater?",
    ),
    row(
        Question::Agroforestry,
        "agroforestry",
        MitigationPractices,
        Protective,
        "Do you plant trees on or around your farm?",
    ),
    row(
        Question::OrganicPractices,
        "organicPractices",
        MitigationPractices,
        Protective,
        "Do you use organic farming methods?",
    ),
    row(
        Question::ClimateSmartSeeds,
        "climateSmartSeeds",
        MitigationPractices,
        Protective,
        "Do you use drought-resistant or improved seeds?",
    ),
    // Financial resilience
    row(
        Question::SavingsAccess,
        "savingsAccess",
        FinancialResilience,
        Protective,
        "Do you have access to savings services?",
    ),
    row(
        Question::CreditAccess,
        "creditAccess",
        FinancialResilience,
        Protective,
        "Can you access credit when needed?",
    ),
    row(
        Question::InsuranceAccess,
        "insuranceAccess",
        FinancialResilience,
        Protective,
        "Do you have crop or livestock insurance?",
    ),
    row(
        Question::CooperativeMember,
        "cooperativeMember",
        FinancialResilience,
        Protective,
        "Are you a member of a farmers cooperative?",
    ),
    row(
        Question::RecordKeeping,
        "recordKeeping",
        FinancialResilience,
        Protective,
        "Do you keep records of your farm income and expenses?",
    ),
];

/// A complete questionnaire response. Every field is required on the wire, so a partial set is
/// rejected at decode time rather than silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnswerSet {
    pub drought_frequency: bool,
    pub flooding_risk: bool,
    pub temperature_extremes: bool,
    pub rainfall_variability: bool,

    pub soil_degradation: bool,
    pub water_scarcity: bool,
    pub pest_disease: bool,
    pub crop_diversity: bool,

    pub weather_info: bool,
    pub alternative_income: bool,
    pub market_access: bool,
    pub training_access: bool,
    pub community_support: bool,

    pub soil_conservation: bool,
    pub water_harvesting: bool,
    pub agroforestry: bool,
    pub organic_practices: bool,
    pub climate_smart_seeds: bool,

    pub savings_access: bool,
    pub credit_access: bool,
    pub insurance_access: bool,
    pub cooperative_member: bool,
    pub record_keeping: bool,
}

impl AnswerSet {
    /// Build an answer set by asking `answer` for every question.
    pub fn from_fn(mut answer: impl FnMut(Question) -> bool) -> Self {
        Self {
            drought_frequency: answer(Question::DroughtFrequency),
            flooding_risk: answer(Question::FloodingRisk),
            temperature_extremes: answer(Question::TemperatureExtremes),
            rainfall_variability: answer(Question::RainfallVariability),
            soil_degradation: answer(Question::SoilDegradation),
            water_scarcity: answer(Question::WaterScarcity),
            pest_disease: answer(Question::PestDisease),
            crop_diversity: answer(Question::CropDiversity),
            weather_info: answer(Question::WeatherInfo),
            alternative_income: answer(Question::AlternativeIncome),
            market_access: answer(Question::MarketAccess),
            training_access: answer(Question::TrainingAccess),
            community_support: answer(Question::CommunitySupport),
            soil_conservation: answer(Question::SoilConservation),
            water_harvesting: answer(Question::WaterHarvesting),
            agroforestry: answer(Question::Agroforestry),
            organic_practices: answer(Question::OrganicPractices),
            climate_smart_seeds: answer(Question::ClimateSmartSeeds),
            savings_access: answer(Question::SavingsAccess),
            credit_access: answer(Question::CreditAccess),
            insurance_access: answer(Question::InsuranceAccess),
            cooperative_member: answer(Question::CooperativeMember),
            record_keeping: answer(Question::RecordKeeping),
        }
    }

    /// Every answer in the farmer's favor.
    pub fn all_favorable() -> Self {
        Self::from_fn(|question| question.polarity().favorable_answer())
    }

    /// Every answer against the farmer.
    pub fn all_unfavorable() -> Self {
        Self::from_fn(|question| !question.polarity().favorable_answer())
    }

    pub fn answer(&self, question: Question) -> bool {
        match question {
            Question::DroughtFrequency => self.drought_frequency,
            Question::FloodingRisk => self.flooding_risk,
            Question::TemperatureExtremes => self.temperature_extremes,
            Question::RainfallVariability => self.rainfall_variability,
            Question::SoilDegradation => self.soil_degradation,
            Question::WaterScarcity => self.water_scarcity,
            Question::PestDisease => self.pest_disease,
            Question::CropDiversity => self.crop_diversity,
            Question::WeatherInfo => self.weather_info,
            Question::AlternativeIncome => self.alternative_income,
            Question::MarketAccess => self.market_access,
            Question::TrainingAccess => self.training_access,
            Question::CommunitySupport => self.community_support,
            Question::SoilConservation => self.soil_conservation,
            Question::WaterHarvesting => self.water_harvesting,
            Question::Agroforestry => self.agroforestry,
            Question::OrganicPractices => self.organic_practices,
            Question::ClimateSmartSeeds => self.climate_smart_seeds,
            Question::SavingsAccess => self.savings_access,
            Question::CreditAccess => self.credit_access,
            Question::InsuranceAccess => self.insurance_access,
            Question::CooperativeMember => self.cooperative_member,
            Question::RecordKeeping => self.record_keeping,
        }
    }

    /// Return a copy with one answer replaced.
    pub fn with(self, question: Question, value: bool) -> Self {
        Self::from_fn(|q| if q == question { value } else { self.answer(q) })
    }

    pub fn is_favorable(&self, question: Question) -> bool {
        question.polarity().is_favorable(self.answer(question))
    }
}
