//! Interaction controller — gates a submission on its inputs, then runs
//! rasterize → assemble → generate, strictly in that order.
//!
//! Flow: check document → check job description → rasterize page 1 →
//!       assemble prompt → one model call → outcome for display.
//!
//! Every failure short-circuits: nothing downstream of the failing step runs.

use bytes::Bytes;
use tracing::{error, info, warn};

use crate::evaluation::action::Action;
use crate::evaluation::prompts::assemble;
use crate::llm_client::{ModelClient, ModelRequestError, ModelResponse};
use crate::rasterizer::{RasterizationError, Rasterizer};

pub const UPLOAD_WARNING: &str = "Please upload a resume PDF file.";
pub const JOB_DESCRIPTION_WARNING: &str = "Please paste a Job Description before submitting.";
pub const UPLOAD_SUCCESS: &str = "Resume Uploaded Successfully!";

#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    pub file_name: Option<String>,
}

/// Everything one form submission carries.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub document: Option<UploadedDocument>,
    pub job_description: String,
    /// Raw action values, in the order they arrived.
    pub actions: Vec<String>,
}

impl Submission {
    pub fn action(&self) -> Option<Action> {
        Action::select(self.actions.iter().map(String::as_str))
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMissing {
    Document,
    JobDescription,
}

impl InputMissing {
    pub fn message(self) -> &'static str {
        match self {
            InputMissing::Document => UPLOAD_WARNING,
            InputMissing::JobDescription => JOB_DESCRIPTION_WARNING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    AwaitingInputs,
    Processing,
    Displaying,
}

#[derive(Debug)]
pub enum Outcome {
    /// No recognized action was triggered; the form is simply shown again.
    NoAction,
    Warning(InputMissing),
    RasterizationFailed(RasterizationError),
    ModelFailed(ModelRequestError),
    Displayed {
        action: Action,
        response: ModelResponse,
    },
}

impl Outcome {
    /// User-facing text for warnings and failures.
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::NoAction | Outcome::Displayed { .. } => None,
            Outcome::Warning(missing) => Some(missing.message().to_string()),
            Outcome::RasterizationFailed(e) => Some(format!(
                "Error converting PDF. Please ensure Poppler is installed and configured correctly. Details: {e}"
            )),
            Outcome::ModelFailed(e) => Some(format!("The model request failed: {e}")),
        }
    }
}

/// One user interaction, walked through the controller state machine.
#[derive(Debug)]
pub struct Interaction {
    state: InteractionState,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction {
    pub fn new() -> Self {
        Self {
            state: InteractionState::Idle,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Page load: the form is shown and inputs are awaited.
    pub fn load(&mut self) {
        if self.state == InteractionState::Idle {
            self.state = InteractionState::AwaitingInputs;
        }
    }

    pub async fn submit(
        &mut self,
        submission: &Submission,
        rasterizer: &dyn Rasterizer,
        model: &dyn ModelClient,
    ) -> Outcome {
        self.load();

        let Some(action) = submission.action() else {
            return Outcome::NoAction;
        };

        let Some(document) = submission.document.as_ref() else {
            warn!("{:?} requested without a resume", action);
            self.state = InteractionState::AwaitingInputs;
            return Outcome::Warning(InputMissing::Document);
        };

        if submission.job_description.is_empty() {
            warn!("{:?} requested without a job description", action);
            self.state = InteractionState::AwaitingInputs;
            return Outcome::Warning(InputMissing::JobDescription);
        }

        self.state = InteractionState::Processing;
        info!(
            "Processing {:?}: resume {} ({} bytes), job description {} chars",
            action,
            document.file_name.as_deref().unwrap_or("<unnamed>"),
            document.bytes.len(),
            submission.job_description.chars().count()
        );

        let page = match rasterizer.rasterize(&document.bytes).await {
            Ok(pages) => match pages.into_iter().next() {
                Some(first) => first,
                None => {
                    return self.fail_rasterization(RasterizationError::Conversion(
                        "document has no pages".to_string(),
                    ))
                }
            },
            Err(e) => return self.fail_rasterization(e),
        };

        let prompt = assemble(action.template(), &submission.job_description);

        match model.generate(&prompt, &page).await {
            Ok(response) => {
                info!(
                    "{:?} completed: {} chars of model output",
                    action,
                    response.as_str().len()
                );
                self.state = InteractionState::Displaying;
                Outcome::Displayed { action, response }
            }
            Err(e) => {
                error!("Model request failed for {:?}: {e}", action);
                self.state = InteractionState::AwaitingInputs;
                Outcome::ModelFailed(e)
            }
        }
    }

    fn fail_rasterization(&mut self, e: RasterizationError) -> Outcome {
        error!("Rasterization failed: {e}");
        self.state = InteractionState::AwaitingInputs;
        Outcome::RasterizationFailed(e)
    }
}
