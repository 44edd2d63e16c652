/// Survey form state and answer resolution.
///
/// The survey has four single-choice questions and one free-text question.
/// A single-choice question with nothing selected resolves to the shared
/// sentinel rather than blocking submission; the free-text answer is trimmed
/// and an empty result gets the same sentinel.
use clubmatch_common::model::{AnswerSet, NO_ANSWER};

/// Raw form state as captured at submit time.
///
/// `None` for a choice question means no option was checked.
#[derive(Debug, Clone, Default)]
pub struct SurveyForm {
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
    pub q4: Option<String>,
    /// Free-text answer, exactly as typed.
    pub q5: String,
}

impl SurveyForm {
    /// Resolve the raw form state into a complete answer set.
    pub fn answers(&self) -> AnswerSet {
        AnswerSet {
            q1: resolve_choice(self.q1.as_deref()),
            q2: resolve_choice(self.q2.as_deref()),
            q3: resolve_choice(self.q3.as_deref()),
            q4: resolve_choice(self.q4.as_deref()),
            q5: resolve_text(&self.q5),
        }
    }
}

/// An unchecked group, and an option whose value is the empty string, both
/// resolve to the sentinel.
fn resolve_choice(checked: Option<&str>) -> String {
    match checked {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => NO_ANSWER.to_string(),
    }
}

fn resolve_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        NO_ANSWER.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchecked_groups_resolve_to_sentinel() {
        let form = SurveyForm {
            q1: Some("Outdoors".to_string()),
            q2: None,
            q3: Some("Evenings".to_string()),
            q4: None,
            q5: "board games".to_string(),
        };
        let answers = form.answers();
        assert_eq!(answers.q1, "Outdoors");
        assert_eq!(answers.q2, NO_ANSWER);
        assert_eq!(answers.q3, "Evenings");
        assert_eq!(answers.q4, NO_ANSWER);
        assert_eq!(answers.q5, "board games");
    }

    #[test]
    fn empty_option_value_resolves_to_sentinel() {
        let form = SurveyForm {
            q1: Some(String::new()),
            ..SurveyForm::default()
        };
        assert_eq!(form.answers().q1, NO_ANSWER);
    }

    #[test]
    fn free_text_is_trimmed_at_the_ends_only() {
        let form = SurveyForm {
            q5: "  chess  and  hiking \n".to_string(),
            ..SurveyForm::default()
        };
        assert_eq!(form.answers().q5, "chess  and  hiking");
    }

    #[test]
    fn whitespace_only_free_text_resolves_to_sentinel() {
        for raw in ["", "   ", "\t\n  "] {
            let form = SurveyForm {
                q5: raw.to_string(),
                ..SurveyForm::default()
            };
            assert_eq!(form.answers().q5, NO_ANSWER, "raw: {raw:?}");
        }
    }
}
