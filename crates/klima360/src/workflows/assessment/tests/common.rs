use crate::workflows::assessment::questionnaire::{AnswerSet, Category, Question};

/// Answer set whose bit `question.index()` holds the raw answer.
pub(super) fn answers_from_mask(mask: u32) -> AnswerSet {
    AnswerSet::from_fn(|question| mask & (1 << question.index()) != 0)
}

/// Deterministic spread of masks across the 2^23 answer space.
pub(super) fn sample_masks() -> impl Iterator<Item = u32> {
    let mut state: u32 = 0x2545_f491;
    let random = std::iter::from_fn(move || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        Some(state >> 9)
    })
    .take(4096);

    [0, (1 << 23) - 1].into_iter().chain(random)
}

/// Unfavorable answers except the first `counts[i]` questions of each category, in table order.
pub(super) fn answers_with_counts(counts: [u8; 5]) -> AnswerSet {
    let mut answers = AnswerSet::all_unfavorable();
    for (category, count) in Category::ordered().into_iter().zip(counts) {
        for spec in category.questions().take(count as usize) {
            answers = answers.with(spec.question, spec.polarity.favorable_answer());
        }
    }
    answers
}

pub(super) fn toggle(answers: AnswerSet, question: Question) -> AnswerSet {
    answers.with(question, !answers.answer(question))
}
