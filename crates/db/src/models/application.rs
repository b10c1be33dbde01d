//! Application form, question and submission models and DTOs.

use kennel_core::applications::QuestionSpec;
use kennel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// A row from the `application_forms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationForm {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A form with its questions in display order.
#[derive(Debug, Clone, Serialize)]
pub struct FormWithQuestions {
    #[serde(flatten)]
    pub form: ApplicationForm,
    pub questions: Vec<ApplicationQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateApplicationForm {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApplicationForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// A row from the `application_questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationQuestion {
    pub id: DbId,
    pub form_id: DbId,
    pub question_text: String,
    pub question_type: String,
    pub options: Option<serde_json::Value>,
    pub is_required: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ApplicationQuestion {
    pub fn spec(&self) -> QuestionSpec<'_> {
        QuestionSpec {
            id: self.id,
            question_text: &self.question_text,
            question_type: &self.question_type,
            is_required: self.is_required,
            options: self.options.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateApplicationQuestion {
    pub question_text: String,
    /// Defaults to `text`.
    pub question_type: Option<String>,
    pub options: Option<serde_json::Value>,
    pub is_required: Option<bool>,
    /// Defaults to one past the form's current last question.
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApplicationQuestion {
    pub question_text: Option<String>,
    pub question_type: Option<String>,
    pub options: Option<serde_json::Value>,
    pub is_required: Option<bool>,
    pub sort_order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// A row from the `application_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationSubmission {
    pub id: DbId,
    pub form_id: DbId,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: Option<String>,
    pub responses: serde_json::Value,
    pub status: String,
    pub customer_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
    pub notes: Option<String>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public submission payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmission {
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: Option<String>,
    /// Object keyed by question id.
    pub responses: serde_json::Value,
}

/// Query-string filters for listing submissions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionListParams {
    pub form_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Review decision for a submission.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubmissionStatus {
    pub status: String,
    pub notes: Option<String>,
    pub customer_id: Option<DbId>,
    pub puppy_id: Option<DbId>,
}
