use serde::{Deserialize, Serialize};

/// Placeholder substituted for any survey field the user left blank.
///
/// The backend receives this literal inside the payload, so both sides of the
/// wire must agree on the exact spelling.
pub const NO_ANSWER: &str = "No answer";

/// A fully resolved set of survey answers.
///
/// Every field is a concrete string: unanswered fields have already been
/// replaced with [`NO_ANSWER`] and `q5` has already been trimmed. Construction
/// happens once per submission; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    /// Selected option of the first single-choice question.
    pub q1: String,
    pub q2: String,
    pub q3: String,
    pub q4: String,
    /// Free-text answer, trimmed of leading/trailing whitespace.
    pub q5: String,
}

/// Response body returned by the recommendation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub status: String,
    pub message: String,
    pub clubs: Vec<ClubMatch>,
}

/// One recommended club.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubMatch {
    pub name: String,
    /// Cosine similarity against the submitted payload, in `[0, 1]`.
    pub score: f64,
    pub description: String,
}
