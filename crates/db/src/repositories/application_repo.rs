//! Repositories for application forms, their questions and submissions.

use kennel_core::pagination::{clamp_offset, list_limit};
use kennel_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::{
    ApplicationForm, ApplicationQuestion, ApplicationSubmission, CreateApplicationForm,
    CreateApplicationQuestion, CreateSubmission, SubmissionListParams, UpdateApplicationForm,
    UpdateApplicationQuestion, UpdateSubmissionStatus,
};

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

const FORM_COLUMNS: &str = "id, name, description, is_active, created_at, updated_at";

/// Provides CRUD operations for application forms.
pub struct ApplicationFormRepo;

impl ApplicationFormRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplicationForm,
    ) -> Result<ApplicationForm, sqlx::Error> {
        let query = format!(
            "INSERT INTO application_forms (name, description, is_active)
             VALUES ($1, $2, COALESCE($3, true))
             RETURNING {FORM_COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationForm>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ApplicationForm>, sqlx::Error> {
        let query = format!("SELECT {FORM_COLUMNS} FROM application_forms WHERE id = $1");
        sqlx::query_as::<_, ApplicationForm>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<ApplicationForm>, sqlx::Error> {
        let query = format!("SELECT {FORM_COLUMNS} FROM application_forms ORDER BY name, id");
        sqlx::query_as::<_, ApplicationForm>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateApplicationForm,
    ) -> Result<Option<ApplicationForm>, sqlx::Error> {
        let query = format!(
            "UPDATE application_forms SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {FORM_COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationForm>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a form. Its questions and submissions cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM application_forms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

const QUESTION_COLUMNS: &str = "id, form_id, question_text, question_type, options, \
    is_required, sort_order, created_at, updated_at";

/// Provides CRUD operations for form questions.
pub struct ApplicationQuestionRepo;

impl ApplicationQuestionRepo {
    /// Add a question. Without an explicit `sort_order` it goes last.
    pub async fn create(
        pool: &PgPool,
        form_id: DbId,
        input: &CreateApplicationQuestion,
    ) -> Result<ApplicationQuestion, sqlx::Error> {
        let query = format!(
            "INSERT INTO application_questions (form_id, question_text, question_type, options, \
                is_required, sort_order)
             VALUES ($1, $2, COALESCE($3, 'text'), $4, COALESCE($5, false),
                COALESCE($6, (SELECT COALESCE(MAX(sort_order) + 1, 0)
                              FROM application_questions WHERE form_id = $1)))
             RETURNING {QUESTION_COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationQuestion>(&query)
            .bind(form_id)
            .bind(&input.question_text)
            .bind(&input.question_type)
            .bind(&input.options)
            .bind(input.is_required)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ApplicationQuestion>, sqlx::Error> {
        let query = format!("SELECT {QUESTION_COLUMNS} FROM application_questions WHERE id = $1");
        sqlx::query_as::<_, ApplicationQuestion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Questions of a form in display order.
    pub async fn list_for_form(
        pool: &PgPool,
        form_id: DbId,
    ) -> Result<Vec<ApplicationQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM application_questions
             WHERE form_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, ApplicationQuestion>(&query)
            .bind(form_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateApplicationQuestion,
    ) -> Result<Option<ApplicationQuestion>, sqlx::Error> {
        let query = format!(
            "UPDATE application_questions SET
                question_text = COALESCE($2, question_text),
                question_type = COALESCE($3, question_type),
                options = COALESCE($4, options),
                is_required = COALESCE($5, is_required),
                sort_order = COALESCE($6, sort_order)
             WHERE id = $1
             RETURNING {QUESTION_COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationQuestion>(&query)
            .bind(id)
            .bind(&input.question_text)
            .bind(&input.question_type)
            .bind(&input.options)
            .bind(input.is_required)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM application_questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

const SUBMISSION_COLUMNS: &str = "id, form_id, applicant_name, applicant_email, \
    applicant_phone, responses, status, customer_id, puppy_id, notes, reviewed_at, \
    created_at, updated_at";

/// Provides storage and review for form submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Store a checked submission as `pending`.
    pub async fn create(
        pool: &PgPool,
        form_id: DbId,
        input: &CreateSubmission,
    ) -> Result<ApplicationSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO application_submissions (form_id, applicant_name, applicant_email, \
                applicant_phone, responses)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {SUBMISSION_COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationSubmission>(&query)
            .bind(form_id)
            .bind(&input.applicant_name)
            .bind(&input.applicant_email)
            .bind(&input.applicant_phone)
            .bind(&input.responses)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ApplicationSubmission>, sqlx::Error> {
        let query = format!("SELECT {SUBMISSION_COLUMNS} FROM application_submissions WHERE id = $1");
        sqlx::query_as::<_, ApplicationSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List submissions, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &SubmissionListParams,
    ) -> Result<Vec<ApplicationSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM application_submissions
             WHERE ($1::BIGINT IS NULL OR form_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ApplicationSubmission>(&query)
            .bind(params.form_id)
            .bind(&params.status)
            .bind(list_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Record a review decision and stamp `reviewed_at`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubmissionStatus,
    ) -> Result<Option<ApplicationSubmission>, sqlx::Error> {
        let query = format!(
            "UPDATE application_submissions SET
                status = $2,
                notes = COALESCE($3, notes),
                customer_id = COALESCE($4, customer_id),
                puppy_id = COALESCE($5, puppy_id),
                reviewed_at = NOW()
             WHERE id = $1
             RETURNING {SUBMISSION_COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationSubmission>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.notes)
            .bind(input.customer_id)
            .bind(input.puppy_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM application_submissions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
