//! Application form questions and submission answer checking.
//!
//! Submissions store answers as a JSON object keyed by question id (as a
//! string). Required questions must have a non-blank answer; answers to
//! choice questions must be one of the question's options.

use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validate;

// ---------------------------------------------------------------------------
// Question types
// ---------------------------------------------------------------------------

pub const QUESTION_TEXT: &str = "text";
pub const QUESTION_TEXTAREA: &str = "textarea";
pub const QUESTION_EMAIL: &str = "email";
pub const QUESTION_PHONE: &str = "phone";
pub const QUESTION_NUMBER: &str = "number";
pub const QUESTION_DATE: &str = "date";
pub const QUESTION_SELECT: &str = "select";
pub const QUESTION_RADIO: &str = "radio";
pub const QUESTION_CHECKBOX: &str = "checkbox";

/// Valid question types.
pub const VALID_QUESTION_TYPES: &[&str] = &[
    QUESTION_TEXT,
    QUESTION_TEXTAREA,
    QUESTION_EMAIL,
    QUESTION_PHONE,
    QUESTION_NUMBER,
    QUESTION_DATE,
    QUESTION_SELECT,
    QUESTION_RADIO,
    QUESTION_CHECKBOX,
];

// ---------------------------------------------------------------------------
// Submission statuses
// ---------------------------------------------------------------------------

pub const SUBMISSION_PENDING: &str = "pending";
pub const SUBMISSION_APPROVED: &str = "approved";
pub const SUBMISSION_REJECTED: &str = "rejected";
pub const SUBMISSION_WAITLISTED: &str = "waitlisted";

/// Valid submission statuses.
pub const VALID_SUBMISSION_STATUSES: &[&str] = &[
    SUBMISSION_PENDING,
    SUBMISSION_APPROVED,
    SUBMISSION_REJECTED,
    SUBMISSION_WAITLISTED,
];

pub fn validate_question_type(question_type: &str) -> Result<(), CoreError> {
    validate::one_of("question_type", question_type, VALID_QUESTION_TYPES)
}

pub fn validate_submission_status(status: &str) -> Result<(), CoreError> {
    validate::one_of("status", status, VALID_SUBMISSION_STATUSES)
}

/// The fields of a stored question that answer checking needs.
#[derive(Debug, Clone, Copy)]
pub struct QuestionSpec<'a> {
    pub id: DbId,
    pub question_text: &'a str,
    pub question_type: &'a str,
    pub is_required: bool,
    pub options: Option<&'a Value>,
}

/// Validate a question definition before it is stored.
pub fn validate_question(
    question_text: &str,
    question_type: &str,
    options: Option<&Value>,
) -> Result<(), CoreError> {
    validate::non_empty("question_text", question_text)?;
    validate_question_type(question_type)?;

    let needs_options = question_type == QUESTION_SELECT || question_type == QUESTION_RADIO;
    match options {
        Some(Value::Null) | None if needs_options => Err(CoreError::Validation(format!(
            "A {question_type} question requires options"
        ))),
        Some(Value::Null) | None => Ok(()),
        Some(value) => {
            let items = value.as_array().ok_or_else(|| {
                CoreError::Validation("options must be an array of strings".into())
            })?;
            if needs_options && items.is_empty() {
                return Err(CoreError::Validation(format!(
                    "A {question_type} question requires at least one option"
                )));
            }
            if items
                .iter()
                .any(|o| o.as_str().map_or(true, |s| s.trim().is_empty()))
            {
                return Err(CoreError::Validation(
                    "options must be an array of non-empty strings".into(),
                ));
            }
            Ok(())
        }
    }
}

/// Whether an answer counts as blank for required-question checking.
fn is_blank(answer: Option<&Value>) -> bool {
    match answer {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(_) => false,
    }
}

/// Texts of required questions without a non-blank answer, in question order.
pub fn missing_required(questions: &[QuestionSpec<'_>], responses: &Map<String, Value>) -> Vec<String> {
    questions
        .iter()
        .filter(|q| q.is_required && is_blank(responses.get(&q.id.to_string())))
        .map(|q| q.question_text.to_string())
        .collect()
}

/// Check a full submission: required answers first, then answer shapes.
pub fn check_submission(
    questions: &[QuestionSpec<'_>],
    responses: &Value,
) -> Result<(), CoreError> {
    let responses = responses
        .as_object()
        .ok_or_else(|| CoreError::Validation("responses must be a JSON object".into()))?;

    let missing = missing_required(questions, responses);
    if !missing.is_empty() {
        return Err(CoreError::MissingAnswers(missing));
    }

    for key in responses.keys() {
        if !questions.iter().any(|q| q.id.to_string() == *key) {
            return Err(CoreError::Validation(format!(
                "responses contains an answer for unknown question '{key}'"
            )));
        }
    }

    for question in questions {
        let answer = responses.get(&question.id.to_string());
        if is_blank(answer) {
            continue;
        }
        if let Some(answer) = answer {
            validate_answer(question, answer)?;
        }
    }
    Ok(())
}

fn option_list<'a>(question: &QuestionSpec<'a>) -> Vec<&'a str> {
    question
        .options
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

fn validate_answer(question: &QuestionSpec<'_>, answer: &Value) -> Result<(), CoreError> {
    let invalid = |why: &str| {
        Err(CoreError::Validation(format!(
            "Invalid answer to '{}': {why}",
            question.question_text
        )))
    };

    match question.question_type {
        QUESTION_SELECT | QUESTION_RADIO => {
            let Some(choice) = answer.as_str() else {
                return invalid("expected a single choice");
            };
            if !option_list(question).contains(&choice) {
                return invalid("not one of the available options");
            }
        }
        QUESTION_CHECKBOX => {
            let options = option_list(question);
            match answer {
                Value::Bool(_) if options.is_empty() => {}
                Value::Array(items) => {
                    for item in items {
                        match item.as_str() {
                            Some(c) if options.is_empty() || options.contains(&c) => {}
                            _ => return invalid("not one of the available options"),
                        }
                    }
                }
                _ => return invalid("expected a list of choices"),
            }
        }
        QUESTION_EMAIL => match answer.as_str() {
            Some(e) if e.validate_email() => {}
            _ => return invalid("expected an email address"),
        },
        QUESTION_NUMBER => {
            let numeric = answer.is_number()
                || answer
                    .as_str()
                    .is_some_and(|s| s.trim().parse::<f64>().is_ok());
            if !numeric {
                return invalid("expected a number");
            }
        }
        QUESTION_DATE => {
            let parsed = answer
                .as_str()
                .is_some_and(|s| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok());
            if !parsed {
                return invalid("expected a date (YYYY-MM-DD)");
            }
        }
        _ => {
            if !answer.is_string() {
                return invalid("expected text");
            }
        }
    }
    Ok(())
}
