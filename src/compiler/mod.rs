use crate::api::types::{TaskParams, TaskPayload};
use crate::error::CompileError;
use crate::flow::{FlowDefinition, ParamList};
use crate::session::AccountContext;
use std::fmt;
use tracing::{debug, warn};

pub mod arguments;
pub mod linearize;

use arguments::{ProjectContext, TriggerArgsProvider};
pub use linearize::{Linearizer, linearize};

/// A non-blocking remark produced while compiling a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileWarning {
    /// The flow chains more reactions than a task can hold; only the first is kept.
    ExtraReactionsDropped { dropped: Vec<String> },
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileWarning::ExtraReactionsDropped { .. } => write!(
                f,
                "Multiple reactions are not supported yet, only the first reaction will be saved"
            ),
        }
    }
}

/// The output of a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTask {
    pub payload: TaskPayload,
    /// Ids of the trigger and reaction nodes the payload was built from.
    pub trigger_node: String,
    pub reaction_node: String,
    pub warnings: Vec<CompileWarning>,
}

/// Flattens parameter values into the backend's positional argument list.
pub fn flatten_params(params: &ParamList) -> Vec<String> {
    params.values().map(str::to_string).collect()
}

/// Turns an editor flow into a backend task payload.
pub struct TaskCompiler {
    flow: FlowDefinition,
    account: AccountContext,
    project: ProjectContext,
    providers: Vec<Box<dyn TriggerArgsProvider>>,
}

pub struct TaskCompilerBuilder {
    flow: FlowDefinition,
    account: AccountContext,
    project: ProjectContext,
    providers: Vec<Box<dyn TriggerArgsProvider>>,
}

impl TaskCompilerBuilder {
    pub fn new(flow: FlowDefinition, account: AccountContext) -> Self {
        Self {
            flow,
            account,
            project: ProjectContext::default(),
            providers: Vec::new(),
        }
    }

    /// Replaces the project id and name prepended to mail and calendar triggers.
    pub fn with_project_context(mut self, project: ProjectContext) -> Self {
        self.project = project;
        self
    }

    /// Registers leading arguments for more triggers. Checked after the project context.
    pub fn with_args_provider(mut self, provider: Box<dyn TriggerArgsProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn build(self) -> TaskCompiler {
        TaskCompiler {
            flow: self.flow,
            account: self.account,
            project: self.project,
            providers: self.providers,
        }
    }
}

impl TaskCompiler {
    pub fn builder(flow: FlowDefinition, account: AccountContext) -> TaskCompilerBuilder {
        TaskCompilerBuilder::new(flow, account)
    }

    fn leading_args(&self, trigger: &str) -> Vec<String> {
        if self.project.applies_to(trigger) {
            return self.project.leading_args();
        }
        self.providers
            .iter()
            .find(|p| p.applies_to(trigger))
            .map(|p| p.leading_args())
            .unwrap_or_default()
    }

    /// Builds the task payload for the flow's first trigger/reaction pair.
    ///
    /// Every failure is detected locally; nothing here talks to the backend.
    pub fn compile(self) -> Result<CompiledTask, CompileError> {
        let sequence = linearize(&self.flow)?;

        if sequence.len() < 2 {
            return Err(CompileError::NotEnoughNodes {
                found: sequence.len(),
            });
        }

        let mut warnings = Vec::new();
        if sequence.len() > 2 {
            let reactions = sequence.len() - 1;
            if self.account.plan.is_metered() {
                return Err(CompileError::PlanLimit {
                    plan: self.account.plan.name().to_string(),
                    reactions,
                });
            }
            let dropped: Vec<String> = sequence[2..].iter().map(|n| n.id.clone()).collect();
            warn!(?dropped, "flow has more than one reaction, keeping the first");
            warnings.push(CompileWarning::ExtraReactionsDropped { dropped });
        }

        let trigger_node = sequence[0];
        let reaction_node = sequence[1];
        let trigger_data = &trigger_node.data;
        let reaction_data = &reaction_node.data;

        let trigger = trigger_data.title().ok_or(CompileError::MissingTrigger)?;
        let action_name = reaction_data.title().ok_or(CompileError::MissingReaction)?;

        let trigger_service = trigger_data
            .service()
            .ok_or_else(|| CompileError::MissingService {
                node_id: trigger_node.id.clone(),
            })?;
        let oauth_token = self
            .account
            .tokens
            .get(trigger_service)
            .ok_or_else(|| CompileError::MissingServiceToken {
                service: trigger_service.to_string(),
            })?;
        if let Some(reaction_service) = reaction_data.service() {
            if self.account.tokens.get(reaction_service).is_none() {
                return Err(CompileError::MissingServiceToken {
                    service: reaction_service.to_string(),
                });
            }
        }

        let mut trigger_args = self.leading_args(trigger);
        trigger_args.extend(flatten_params(&trigger_data.params));

        let payload = TaskPayload {
            trigger: trigger.to_string(),
            trigger_args,
            action_name: action_name.to_string(),
            action_params: flatten_params(&reaction_data.params),
            params: TaskParams {
                oauth_token: Some(oauth_token.to_string()),
                service: trigger_service.to_string(),
            },
            user_id: self.account.user_id,
        };
        debug!(trigger = %payload.trigger, action = %payload.action_name, "compiled task payload");

        Ok(CompiledTask {
            payload,
            trigger_node: trigger_node.id.clone(),
            reaction_node: reaction_node.id.clone(),
            warnings,
        })
    }
}
