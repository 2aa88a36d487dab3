use super::super::questionnaire::{AnswerSet, Category, QUESTIONNAIRE};
use super::CategoryScores;

/// Favorable-answer counts per category, derived from the questionnaire table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryTallies {
    pub exposure: u8,
    pub sensitivity: u8,
    pub adaptive_capacity: u8,
    pub mitigation_practices: u8,
    pub financial_resilience: u8,
}

impl CategoryTallies {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        let mut tallies = Self::default();
        for spec in QUESTIONNAIRE.iter() {
            if spec.polarity.is_favorable(answers.answer(spec.question)) {
                *tallies.slot_mut(spec.category) += 1;
            }
        }
        tallies
    }

    pub fn favorable(&self, category: Category) -> u8 {
        match category {
            Category::Exposure => self.exposure,
            Category::Sensitivity => self.sensitivity,
            Category::AdaptiveCapacity => self.adaptive_capacity,
            Category::MitigationPractices => self.mitigation_practices,
            Category::FinancialResilience => self.financial_resilience,
        }
    }

    /// Number of hazards reported in the Exposure category.
    pub fn exposure_raw(&self) -> u8 {
        Category::Exposure.question_count() - self.exposure
    }

    pub fn percentages(&self) -> CategoryScores {
        let percent = |category: Category| {
            round_percent(
                u32::from(self.favorable(category)),
                u32::from(category.question_count()),
            )
        };

        CategoryScores {
            exposure: percent(Category::Exposure),
            sensitivity: percent(Category::Sensitivity),
            adaptive_capacity: percent(Category::AdaptiveCapacity),
            mitigation_practices: percent(Category::MitigationPractices),
            financial_resilience: percent(Category::FinancialResilience),
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut u8 {
        match category {
            Category::Exposure => &mut self.exposure,
            Category::Sensitivity => &mut self.sensitivity,
            Category::AdaptiveCapacity => &mut self.adaptive_capacity,
            Category::MitigationPractices => &mut self.mitigation_practices,
            Category::FinancialResilience => &mut self.financial_resilience,
        }
    }
}

/// `round(numerator / denominator)`, halves rounded up, in exact integer arithmetic.
pub(crate) fn round_div(numerator: u32, denominator: u32) -> u32 {
    debug_assert!(denominator > 0);
    (2 * numerator + denominator) / (2 * denominator)
}

/// `round(numerator / denominator * 100)`, saturating at `u8::MAX`.
pub(crate) fn round_percent(numerator: u32, denominator: u32) -> u8 {
    u8::try_from(round_div(numerator * 100, denominator)).unwrap_or(u8::MAX)
}
