//! Offline questionnaire capture: one CSV row per respondent, one column per question key.

mod normalizer;
mod parser;

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::workflows::assessment::{
    AnswerSet, ClimateScoreResult, Product, ProductCatalog, ScoringEngine, ScoringPolicy,
};

#[derive(Debug)]
pub enum SurveyImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
    DuplicateColumn(&'static str),
    BlankAnswer {
        line: u64,
        question: &'static str,
    },
    InvalidAnswer {
        line: u64,
        question: &'static str,
        value: String,
    },
}

impl std::fmt::Display for SurveyImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyImportError::Io(err) => write!(f, "failed to read survey export: {}", err),
            SurveyImportError::Csv(err) => write!(f, "invalid survey CSV data: {}", err),
            SurveyImportError::MissingColumn(key) => {
                write!(f, "survey export has no column for question '{key}'")
            }
            SurveyImportError::DuplicateColumn(key) => {
                write!(f, "survey export has more than one column for question '{key}'")
            }
            SurveyImportError::BlankAnswer { line, question } => {
                write!(f, "line {line}: no answer recorded for '{question}'")
            }
            SurveyImportError::InvalidAnswer {
                line,
                question,
                value,
            } => write!(
                f,
                "line {line}: '{value}' is not a yes/no answer for '{question}'"
            ),
        }
    }
}

impl std::error::Error for SurveyImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurveyImportError::Io(err) => Some(err),
            SurveyImportError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SurveyImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SurveyImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One complete questionnaire read from the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyResponse {
    /// 1-based line in the source file.
    pub line: u64,
    /// Respondent column value, or `line N` when the export has none.
    pub respondent: String,
    pub answers: AnswerSet,
}

/// Scoring outcome for one imported response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResponse<B> {
    pub respondent: String,
    #[serde(flatten)]
    pub result: ClimateScoreResult<B>,
    pub matched_product: Product<B>,
}

pub struct SurveyImporter;

impl SurveyImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SurveyResponse>, SurveyImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SurveyResponse>, SurveyImportError> {
        parser::parse_responses(reader)
    }

    /// Score each response and attach its catalog product.
    pub fn score<P: ScoringPolicy>(
        responses: &[SurveyResponse],
        engine: &ScoringEngine<P>,
        catalog: &ProductCatalog<P::Band>,
    ) -> Vec<ScoredResponse<P::Band>> {
        responses
            .iter()
            .map(|response| {
                let result = engine.score(&response.answers);
                ScoredResponse {
                    respondent: response.respondent.clone(),
                    matched_product: catalog.lookup(result.score_band).clone(),
                    result,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::{CategoryAverage, Question, RiskTier};
    use std::io::Cursor;

    fn header() -> String {
        let keys: Vec<&str> = Question::ALL.iter().map(|question| question.key()).collect();
        format!("Farmer ID,{}", keys.join(","))
    }

    fn row(respondent: &str, answers: &AnswerSet) -> String {
        let cells: Vec<&str> = Question::ALL
            .iter()
            .map(|question| if answers.answer(*question) { "yes" } else { "no" })
            .collect();
        format!("{respondent},{}", cells.join(","))
    }

    #[test]
    fn imports_rows_with_respondent_column() {
        let csv = format!(
            "{}\n{}\n{}\n",
            header(),
            row("KE-001", &AnswerSet::all_favorable()),
            row("KE-002", &AnswerSet::all_unfavorable()),
        );

        let responses = SurveyImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].respondent, "KE-001");
        assert_eq!(responses[0].line, 2);
        assert_eq!(responses[0].answers, AnswerSet::all_favorable());
        assert_eq!(responses[1].answers, AnswerSet::all_unfavorable());
    }

    #[test]
    fn headers_may_use_snake_case_in_any_order() {
        let mut keys: Vec<String> = Question::ALL
            .iter()
            .map(|question| {
                question
                    .key()
                    .chars()
                    .flat_map(|ch| {
                        if ch.is_ascii_uppercase() {
                            vec!['_', ch.to_ascii_lowercase()]
                        } else {
                            vec![ch]
                        }
                    })
                    .collect()
            })
            .collect();
        keys.reverse();
        let cells = vec!["Y"; keys.len()];
        let csv = format!("{}\n{}\n", keys.join(","), cells.join(","));

        let responses = SurveyImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].respondent, "line 2");
        assert!(responses[0].answers.drought_frequency);
        assert!(responses[0].answers.record_keeping);
    }

    #[test]
    fn missing_question_column_is_rejected() {
        let csv = "farmer,droughtFrequency\nKE-001,yes\n";
        let error = SurveyImporter::from_reader(Cursor::new(csv)).expect_err("columns missing");
        assert!(matches!(error, SurveyImportError::MissingColumn("floodingRisk")));
    }

    #[test]
    fn blank_and_invalid_cells_are_rejected_with_line() {
        let mut cells = row("KE-001", &AnswerSet::all_favorable());
        cells = cells.replacen("yes", "", 1);
        let csv = format!("{}\n{}\n", header(), cells);
        let error = SurveyImporter::from_reader(Cursor::new(csv)).expect_err("blank rejected");
        assert!(matches!(
            error,
            SurveyImportError::BlankAnswer { line: 2, .. }
        ));

        let csv = format!(
            "{}\n{}\n{}\n",
            header(),
            row("KE-001", &AnswerSet::all_favorable()),
            row("KE-002", &AnswerSet::all_favorable()).replacen("yes", "sometimes", 1),
        );
        let error = SurveyImporter::from_reader(Cursor::new(csv)).expect_err("invalid rejected");
        assert_eq!(
            error.to_string(),
            "line 3: 'sometimes' is not a yes/no answer for 'cropDiversity'"
        );
    }

    #[test]
    fn score_attaches_catalog_products() {
        let csv = format!("{}\n{}\n", header(), row("KE-001", &AnswerSet::all_favorable()));
        let responses = SurveyImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        let scored = SurveyImporter::score(
            &responses,
            &ScoringEngine::new(CategoryAverage),
            &ProductCatalog::standard(),
        );

        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].result.total_score, 100);
        assert_eq!(scored[0].result.score_band, RiskTier::Excellent);
        assert_eq!(scored[0].matched_product.id, "excellent-bundle");
    }
}
