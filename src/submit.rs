//! Sending a compiled flow to the backend and reporting back to the user.
use crate::api::TaskBackend;
use crate::compiler::TaskCompiler;
use crate::compiler::arguments::ProjectContext;
use crate::error::{ApiError, CompileError};
use crate::flow::FlowDefinition;
use crate::session::AccountContext;
use std::sync::Arc;
use tracing::{error, info};

pub const SAVE_FAILED_TITLE: &str = "Failed to save flow";
pub const SAVE_FAILED_MESSAGE: &str = "An error occurred while saving your flow";
pub const UNREACHABLE_MESSAGE: &str = "Network error or server is unreachable";
pub const SAVED_TITLE: &str = "Flow saved";
pub const SAVED_MESSAGE: &str = "Your flow has been saved successfully";

/// Screens the client can be sent to after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
    /// Nothing to show.
    Silent,
}

/// The dialog shown once a save attempt is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub title: String,
    pub message: String,
    pub kind: FeedbackKind,
    /// Non-blocking remarks, shown alongside a successful save.
    pub warnings: Vec<String>,
    pub navigate: Option<Route>,
}

impl Feedback {
    pub fn success(warnings: Vec<String>) -> Self {
        Self {
            title: SAVED_TITLE.to_string(),
            message: SAVED_MESSAGE.to_string(),
            kind: FeedbackKind::Success,
            warnings,
            navigate: Some(Route::Dashboard),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: SAVE_FAILED_TITLE.to_string(),
            message: message.into(),
            kind: FeedbackKind::Error,
            warnings: Vec::new(),
            navigate: None,
        }
    }

    /// No dialog at all.
    pub fn none() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            kind: FeedbackKind::Silent,
            warnings: Vec::new(),
            navigate: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == FeedbackKind::Success
    }

    pub fn is_shown(&self) -> bool {
        self.kind != FeedbackKind::Silent
    }
}

/// Compiles flows and posts them as tasks, one attempt each.
#[derive(Clone)]
pub struct Submitter {
    backend: Arc<dyn TaskBackend>,
    project: ProjectContext,
}

impl Submitter {
    pub fn new(backend: Arc<dyn TaskBackend>) -> Self {
        Self {
            backend,
            project: ProjectContext::default(),
        }
    }

    pub fn with_project_context(mut self, project: ProjectContext) -> Self {
        self.project = project;
        self
    }

    /// Compiles `flow` for `account` and creates the task.
    ///
    /// Local failures never reach the network. Backend rejections are logged
    /// and reported with a generic message; an unreachable backend says so.
    pub async fn submit(&self, flow: &FlowDefinition, account: &AccountContext) -> Feedback {
        let compiled = TaskCompiler::builder(flow.clone(), account.clone())
            .with_project_context(self.project.clone())
            .build()
            .compile();

        let compiled = match compiled {
            Ok(compiled) => compiled,
            Err(CompileError::MissingTrigger) => return Feedback::none(),
            Err(e) => return Feedback::error(e.to_string()),
        };

        match self.backend.create_task(&compiled.payload).await {
            Ok(response) => {
                info!(
                    trigger = %compiled.payload.trigger,
                    action = %compiled.payload.action_name,
                    message = %response.message,
                    "flow saved"
                );
                Feedback::success(compiled.warnings.iter().map(ToString::to_string).collect())
            }
            Err(ApiError::Unreachable(e)) => {
                error!(error = %e, "backend unreachable, flow not saved");
                Feedback::error(UNREACHABLE_MESSAGE)
            }
            Err(e) => {
                error!(error = %e, "failed to save flow");
                Feedback::error(SAVE_FAILED_MESSAGE)
            }
        }
    }
}
