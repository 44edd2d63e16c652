/// Payload formatting for the `/submit` wire format.
///
/// The body sent to the backend is a single plain-text string of labeled
/// answers. The deployed backend was built against a payload that repeats the
/// `Q5` entry three times in a row, so the repetition count is part of the
/// wire contract and lives here rather than being hard-coded at the call
/// site.
use crate::model::AnswerSet;

/// Formatter for the plain-text submission payload.
///
/// `q5_repeats` controls how many `, Q5: <value>` segments are appended after
/// the four single-choice answers. The default of 3 reproduces what the
/// deployed backend parser was written against. Whether the repetition is a
/// deliberate weighting trick or an upstream copy-paste bug is unconfirmed;
/// an integrator who settles that with the backend owners sets this to 1
/// instead of editing the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadTemplate {
    pub q5_repeats: usize,
}

impl Default for PayloadTemplate {
    fn default() -> Self {
        Self { q5_repeats: 3 }
    }
}

impl PayloadTemplate {
    /// Render the answer set into the wire payload.
    ///
    /// With the default template the output is exactly
    /// `Q1: {q1}, Q2: {q2}, Q3: {q3}, Q4: {q4}, Q5: {q5}, Q5: {q5}, Q5: {q5}`.
    pub fn render(&self, answers: &AnswerSet) -> String {
        let mut out = format!(
            "Q1: {}, Q2: {}, Q3: {}, Q4: {}",
            answers.q1, answers.q2, answers.q3, answers.q4
        );
        for _ in 0..self.q5_repeats {
            out.push_str(", Q5: ");
            out.push_str(&answers.q5);
        }
        out
    }
}
