use std::io::Read;

use csv::StringRecord;

use super::normalizer::{normalize_header, parse_answer};
use super::{SurveyImportError, SurveyResponse};
use crate::workflows::assessment::{AnswerSet, Question, QUESTION_COUNT};

const RESPONDENT_HEADERS: [&str; 4] = ["farmer", "farmerid", "respondent", "name"];

/// Column positions resolved from the header row.
#[derive(Debug)]
struct ColumnLayout {
    respondent: Option<usize>,
    questions: [usize; QUESTION_COUNT],
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, SurveyImportError> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

        let respondent = RESPONDENT_HEADERS
            .iter()
            .find_map(|name| normalized.iter().position(|header| header == name));

        let mut questions = [0usize; QUESTION_COUNT];
        for question in Question::ALL {
            let wanted = normalize_header(question.key());
            let mut matches = normalized
                .iter()
                .enumerate()
                .filter(|(_, header)| **header == wanted)
                .map(|(index, _)| index);

            let index = matches
                .next()
                .ok_or(SurveyImportError::MissingColumn(question.key()))?;
            if matches.next().is_some() {
                return Err(SurveyImportError::DuplicateColumn(question.key()));
            }
            questions[question.index()] = index;
        }

        Ok(Self {
            respondent,
            questions,
        })
    }
}

pub(crate) fn parse_responses<R: Read>(reader: R) -> Result<Vec<SurveyResponse>, SurveyImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let layout = ColumnLayout::from_headers(csv_reader.headers()?)?;
    let mut responses = Vec::new();

    for (row_index, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or(row_index as u64 + 2);

        responses.push(parse_row(&layout, &record, line)?);
    }

    Ok(responses)
}

fn parse_row(
    layout: &ColumnLayout,
    record: &StringRecord,
    line: u64,
) -> Result<SurveyResponse, SurveyImportError> {
    let mut answers = AnswerSet::all_unfavorable();
    for question in Question::ALL {
        let cell = record
            .get(layout.questions[question.index()])
            .unwrap_or_default();
        if cell.is_empty() {
            return Err(SurveyImportError::BlankAnswer {
                line,
                question: question.key(),
            });
        }
        let answer = parse_answer(cell).ok_or_else(|| SurveyImportError::InvalidAnswer {
            line,
            question: question.key(),
            value: cell.to_string(),
        })?;
        answers = answers.with(question, answer);
    }

    let respondent = layout
        .respondent
        .and_then(|index| record.get(index))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("line {line}"));

    Ok(SurveyResponse {
        line,
        respondent,
        answers,
    })
}
