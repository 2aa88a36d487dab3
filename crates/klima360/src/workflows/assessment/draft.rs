use serde::{Deserialize, Serialize};

use super::questionnaire::{AnswerSet, Category, Question, QUESTION_COUNT};

/// Validation failures raised before a response may reach the scoring engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("questionnaire incomplete, unanswered: {}", keys(.missing))]
    Incomplete { missing: Vec<Question> },
    #[error("unknown questionnaire field '{0}'")]
    UnknownQuestion(String),
}

fn keys(questions: &[Question]) -> String {
    questions
        .iter()
        .map(|question| question.key())
        .collect::<Vec<_>>()
        .join(", ")
}

/// In-progress questionnaire for one farmer, walked one category at a time.
///
/// The draft is plain state owned by the caller and serializes, so an unfinished questionnaire
/// can be saved and resumed. It is handed to [`QuestionnaireDraft::finish`]
/// at submission and only a complete draft yields an [`AnswerSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireDraft {
    answers: [Option<bool>; QUESTION_COUNT],
}

impl QuestionnaireDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question: Question, answer: bool) -> &mut Self {
        self.answers[question.index()] = Some(answer);
        self
    }

    /// Record an answer addressed by its wire key.
    pub fn record_key(&mut self, key: &str, answer: bool) -> Result<&mut Self, QuestionnaireError> {
        let question = Question::from_key(key)
            .ok_or_else(|| QuestionnaireError::UnknownQuestion(key.to_string()))?;
        Ok(self.record(question, answer))
    }

    pub fn clear(&mut self, question: Question) {
        self.answers[question.index()] = None;
    }

    pub fn answer(&self, question: Question) -> Option<bool> {
        self.answers[question.index()]
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_some()).count()
    }

    pub fn progress_pct(&self) -> u8 {
        (self.answered() * 100 / QUESTION_COUNT) as u8
    }

    pub fn is_category_complete(&self, category: Category) -> bool {
        category
            .questions()
            .all(|spec| self.answer(spec.question).is_some())
    }

    /// Whether the wizard may move past `category`: it and every earlier category are complete.
    pub fn can_advance(&self, category: Category) -> bool {
        Category::ordered()
            .into_iter()
            .take_while(|candidate| *candidate <= category)
            .all(|candidate| self.is_category_complete(candidate))
    }

    pub fn next_incomplete_category(&self) -> Option<Category> {
        Category::ordered()
            .into_iter()
            .find(|category| !self.is_category_complete(*category))
    }

    pub fn missing(&self) -> Vec<Question> {
        Question::ALL
            .into_iter()
            .filter(|question| self.answer(*question).is_none())
            .collect()
    }

    pub fn finish(&self) -> Result<AnswerSet, QuestionnaireError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(QuestionnaireError::Incomplete { missing });
        }

        Ok(AnswerSet::from_fn(|question| {
            self.answer(question).unwrap_or_default()
        }))
    }
}

impl From<AnswerSet> for QuestionnaireDraft {
    fn from(answers: AnswerSet) -> Self {
        let mut draft = Self::new();
        for question in Question::ALL {
            draft.record(question, answers.answer(question));
        }
        draft
    }
}

impl AnswerSet {
    /// Build a complete answer set from `(wire key, answer)` pairs.
    pub fn from_keyed<'a, I>(pairs: I) -> Result<Self, QuestionnaireError>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut draft = QuestionnaireDraft::new();
        for (key, answer) in pairs {
            draft.record_key(key, answer)?;
        }
        draft.finish()
    }
}
