use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::assessment::score_model::AssessmentMethod;

/// Free-form questionnaire answers keyed by question id.
pub type Questionnaire = BTreeMap<String, Value>;

/// Caller contract violation, raised before any model call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("either resume text or questionnaire answers must be supplied")]
    Empty,
}

/// What the user submitted for assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub questionnaire: Option<Questionnaire>,
}

impl AssessmentInput {
    pub fn from_resume(text: impl Into<String>) -> Self {
        Self {
            resume_text: Some(text.into()),
            questionnaire: None,
        }
    }

    pub fn from_questionnaire(answers: Questionnaire) -> Self {
        Self {
            resume_text: None,
            questionnaire: Some(answers),
        }
    }

    /// Non-blank résumé text, if any.
    pub fn resume(&self) -> Option<&str> {
        self.resume_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Questionnaire with at least one field, if any.
    pub fn answers(&self) -> Option<&Questionnaire> {
        self.questionnaire.as_ref().filter(|q| !q.is_empty())
    }

    pub fn answered_fields(&self) -> usize {
        self.answers()
            .map(|q| q.values().filter(|v| is_answered(v)).count())
            .unwrap_or(0)
    }

    pub fn method(&self) -> Result<AssessmentMethod, InputError> {
        match (self.resume(), self.answers()) {
            (Some(_), Some(_)) => Ok(AssessmentMethod::Mixed),
            (Some(_), None) => Ok(AssessmentMethod::Resume),
            (None, Some(_)) => Ok(AssessmentMethod::Questionnaire),
            (None, None) => Err(InputError::Empty),
        }
    }
}

fn is_answered(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_from_contents() {
        assert_eq!(
            AssessmentInput::from_resume("Rust dev").method(),
            Ok(AssessmentMethod::Resume)
        );
        let answers: Questionnaire = [("role".to_string(), json!("backend"))].into();
        assert_eq!(
            AssessmentInput::from_questionnaire(answers.clone()).method(),
            Ok(AssessmentMethod::Questionnaire)
        );
        let mixed = AssessmentInput {
            resume_text: Some("Rust dev".to_string()),
            questionnaire: Some(answers),
        };
        assert_eq!(mixed.method(), Ok(AssessmentMethod::Mixed));
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let blank = AssessmentInput {
            resume_text: Some("   \n".to_string()),
            questionnaire: Some(Questionnaire::new()),
        };
        assert_eq!(blank.method(), Err(InputError::Empty));
        assert_eq!(AssessmentInput::default().method(), Err(InputError::Empty));
    }

    #[test]
    fn test_answered_fields_skip_empty_values() {
        let answers: Questionnaire = [
            ("a".to_string(), json!("yes")),
            ("b".to_string(), json!("")),
            ("c".to_string(), Value::Null),
            ("d".to_string(), json!([])),
            ("e".to_string(), json!(["rust"])),
            ("f".to_string(), json!(3)),
        ]
        .into();
        assert_eq!(AssessmentInput::from_questionnaire(answers).answered_fields(), 3);
    }
}
