//! Axum route handlers for the evaluation form and JSON API.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::evaluation::action::Action;
use crate::evaluation::controller::{Interaction, Outcome, Submission, UploadedDocument};
use crate::evaluation::page::{render, PageView};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const RESUME_FIELD: &str = "resume";
pub const ACTION_FIELD: &str = "action";

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EvaluationResponse {
    Ok {
        action: Action,
        heading: &'static str,
        response: String,
    },
    Warning {
        message: String,
    },
    Error {
        message: String,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_index() -> Html<String> {
    Html(render(&PageView::empty()))
}

/// POST /
///
/// Form submission from the page. Always answers with the re-rendered page;
/// warnings and failures appear in place of the result.
pub async fn handle_form_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let submission = read_submission(multipart).await?;
    let outcome = run_interaction(&state, &submission).await;

    Ok(Html(render(&PageView {
        job_description: &submission.job_description,
        document_uploaded: submission.has_document(),
        outcome: Some(&outcome),
    })))
}

/// POST /api/v1/evaluations
///
/// Same pipeline as the form, for programmatic clients.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<EvaluationResponse>), AppError> {
    let submission = read_submission(multipart).await?;
    let outcome = run_interaction(&state, &submission).await;

    let message = outcome.message().unwrap_or_default();
    let (status, body) = match outcome {
        Outcome::NoAction => {
            return Err(AppError::Validation(format!(
                "{ACTION_FIELD} must be one of: evaluate, match, improve"
            )))
        }
        Outcome::Displayed { action, response } => (
            StatusCode::OK,
            EvaluationResponse::Ok {
                action,
                heading: action.heading(),
                response: response.into_string(),
            },
        ),
        Outcome::Warning(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            EvaluationResponse::Warning { message },
        ),
        Outcome::RasterizationFailed(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            EvaluationResponse::Error { message },
        ),
        Outcome::ModelFailed(_) => (StatusCode::BAD_GATEWAY, EvaluationResponse::Error { message }),
    };

    Ok((status, Json(body)))
}

async fn run_interaction(state: &AppState, submission: &Submission) -> Outcome {
    let mut interaction = Interaction::new();
    interaction.load();
    let outcome = interaction
        .submit(submission, state.rasterizer.as_ref(), state.model.as_ref())
        .await;
    debug!("Interaction ended in {:?}", interaction.state());
    outcome
}

/// Collects the form fields. An empty file part means nothing was chosen.
async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            JOB_DESCRIPTION_FIELD => {
                submission.job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read {JOB_DESCRIPTION_FIELD}: {e}"))
                })?;
            }
            RESUME_FIELD => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read {RESUME_FIELD}: {e}"))
                })?;
                if !bytes.is_empty() {
                    submission.document = Some(UploadedDocument { bytes, file_name });
                }
            }
            ACTION_FIELD => {
                let value = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read {ACTION_FIELD}: {e}"))
                })?;
                submission.actions.push(value);
            }
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(submission)
}
