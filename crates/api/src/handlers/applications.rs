//! Handlers for puppy application forms, their questions and submissions
//! (`/applications`).
//!
//! Viewing a form and submitting it are public; everything else requires
//! [`AuthUser`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kennel_core::applications::{self, QuestionSpec};
use kennel_core::contacts;
use kennel_core::error::CoreError;
use kennel_core::types::DbId;
use kennel_core::validate;
use kennel_db::models::application::{
    CreateApplicationForm, CreateApplicationQuestion, CreateSubmission, FormWithQuestions,
    SubmissionListParams, UpdateApplicationForm, UpdateApplicationQuestion,
    UpdateSubmissionStatus,
};
use kennel_db::repositories::{ApplicationFormRepo, ApplicationQuestionRepo, SubmissionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// GET /api/applications/forms
pub async fn list_forms(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = ApplicationFormRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/applications/forms/{id} (public)
///
/// The form with its questions in display order.
pub async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let form = ApplicationFormRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ApplicationForm", id))?;
    let questions = ApplicationQuestionRepo::list_for_form(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: FormWithQuestions { form, questions },
    }))
}

/// POST /api/applications/forms
pub async fn create_form(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateApplicationForm>,
) -> AppResult<impl IntoResponse> {
    validate::non_empty("name", &input.name)?;
    let form = ApplicationFormRepo::create(&state.pool, &input).await?;

    tracing::info!(form_id = form.id, "Application form created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: form })))
}

/// PUT /api/applications/forms/{id}
pub async fn update_form(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateApplicationForm>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_deref() {
        validate::non_empty("name", name)?;
    }
    let form = ApplicationFormRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("ApplicationForm", id))?;
    Ok(Json(DataResponse { data: form }))
}

/// DELETE /api/applications/forms/{id}
///
/// Questions and submissions are removed with the form.
pub async fn delete_form(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ApplicationFormRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("ApplicationForm", id))
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// POST /api/applications/forms/{id}/questions
pub async fn create_question(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(form_id): Path<DbId>,
    Json(input): Json<CreateApplicationQuestion>,
) -> AppResult<impl IntoResponse> {
    ApplicationFormRepo::find_by_id(&state.pool, form_id)
        .await?
        .ok_or(AppError::not_found("ApplicationForm", form_id))?;

    applications::validate_question(
        &input.question_text,
        input
            .question_type
            .as_deref()
            .unwrap_or(applications::QUESTION_TEXT),
        input.options.as_ref(),
    )?;

    let question = ApplicationQuestionRepo::create(&state.pool, form_id, &input).await?;

    tracing::info!(form_id, question_id = question.id, "Application question added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// PUT /api/applications/questions/{id}
pub async fn update_question(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateApplicationQuestion>,
) -> AppResult<impl IntoResponse> {
    let existing = ApplicationQuestionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ApplicationQuestion", id))?;

    applications::validate_question(
        input
            .question_text
            .as_deref()
            .unwrap_or(&existing.question_text),
        input
            .question_type
            .as_deref()
            .unwrap_or(&existing.question_type),
        input.options.as_ref().or(existing.options.as_ref()),
    )?;

    let question = ApplicationQuestionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("ApplicationQuestion", id))?;
    Ok(Json(DataResponse { data: question }))
}

/// DELETE /api/applications/questions/{id}
pub async fn delete_question(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ApplicationQuestionRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("ApplicationQuestion", id))
    }
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// POST /api/applications/forms/{id}/submit (public)
///
/// Every required question must be answered; a missing answer yields 400
/// with the missing question texts under `details.missing`. Inactive forms
/// are rejected with 409.
pub async fn submit(
    State(state): State<AppState>,
    Path(form_id): Path<DbId>,
    Json(mut input): Json<CreateSubmission>,
) -> AppResult<impl IntoResponse> {
    let form = ApplicationFormRepo::find_by_id(&state.pool, form_id)
        .await?
        .ok_or(AppError::not_found("ApplicationForm", form_id))?;
    if !form.is_active {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Application form '{}' is not accepting submissions",
            form.name
        ))));
    }

    validate::non_empty("applicant_name", &input.applicant_name)?;
    input.applicant_email = contacts::normalize_email(&input.applicant_email);
    validate::non_empty("applicant_email", &input.applicant_email)?;
    contacts::validate_email(Some(&input.applicant_email))?;

    let questions = ApplicationQuestionRepo::list_for_form(&state.pool, form_id).await?;
    let specs: Vec<QuestionSpec<'_>> = questions.iter().map(|q| q.spec()).collect();
    applications::check_submission(&specs, &input.responses)?;

    let submission = SubmissionRepo::create(&state.pool, form_id, &input).await?;

    tracing::info!(
        form_id,
        submission_id = submission.id,
        "Application submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: submission })))
}

/// GET /api/applications/submissions
pub async fn list_submissions(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SubmissionListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        applications::validate_submission_status(status)?;
    }
    let items = SubmissionRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/applications/submissions/{id}
pub async fn get_submission(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let submission = SubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ApplicationSubmission", id))?;
    Ok(Json(DataResponse { data: submission }))
}

/// PUT /api/applications/submissions/{id}/status
///
/// Records the review decision and sets `reviewed_at`.
pub async fn update_submission_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubmissionStatus>,
) -> AppResult<impl IntoResponse> {
    applications::validate_submission_status(&input.status)?;

    let submission = SubmissionRepo::update_status(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("ApplicationSubmission", id))?;

    tracing::info!(submission_id = id, status = %submission.status, "Submission reviewed");

    Ok(Json(DataResponse { data: submission }))
}

/// DELETE /api/applications/submissions/{id}
pub async fn delete_submission(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SubmissionRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("ApplicationSubmission", id))
    }
}
