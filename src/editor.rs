//! One editing session of a flow: open, set up nodes, configure, save.
use crate::api::{Plan, TaskBackend};
use crate::error::EditorError;
use crate::flow::{FlowStore, IntoFlow, ParamSpec, template_by_id};
use crate::session::AccountContext;
use crate::submit::{Feedback, Submitter};
use tracing::{debug, warn};

/// Number of tasks a free account may own.
pub const FREE_PLAN_TASK_LIMIT: usize = 10;

/// What the editor was opened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    New,
    Template(String),
    Existing(u64),
}

impl EditorMode {
    /// Reads the id segment of the editor route: `new`, a template id, or a task id.
    pub fn parse(route_id: &str) -> Option<Self> {
        let id = route_id.trim();
        if id == "new" {
            Some(EditorMode::New)
        } else if id.contains("template") {
            Some(EditorMode::Template(id.to_string()))
        } else {
            id.parse().ok().map(EditorMode::Existing)
        }
    }
}

pub struct EditorSession {
    mode: EditorMode,
    store: FlowStore,
}

impl EditorSession {
    /// Seeds the graph for `mode`. Existing tasks are fetched from `backend`.
    ///
    /// An unknown template id opens the plain seeded graph.
    pub async fn open(mode: EditorMode, backend: &dyn TaskBackend) -> Result<Self, EditorError> {
        let store = match &mode {
            EditorMode::New => FlowStore::seeded(),
            EditorMode::Template(id) => match template_by_id(id) {
                Some(template) => FlowStore::from_definition(template.into_flow()?),
                None => {
                    warn!(template = %id, "unknown template, opening a blank flow");
                    FlowStore::seeded()
                }
            },
            EditorMode::Existing(task_id) => {
                let record = backend.get_task(*task_id).await?;
                FlowStore::from_definition(record.into_flow()?)
            }
        };
        debug!(?mode, nodes = store.nodes().len(), "opened editor");
        Ok(Self { mode, store })
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn store(&self) -> &FlowStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FlowStore {
        &mut self.store
    }

    /// Picks the service and the trigger or reaction of a node.
    ///
    /// Changing the selection clears parameters entered for the previous one.
    /// Returns whether the node can now be configured.
    pub fn setup(
        &mut self,
        node_id: &str,
        service: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<bool, EditorError> {
        let data = self
            .store
            .node_data_mut(node_id)
            .ok_or_else(|| EditorError::NodeNotFound(node_id.to_string()))?;

        let service = service.into();
        let title = title.into();
        if data.service.as_deref() != Some(service.as_str())
            || data.title.as_deref() != Some(title.as_str())
        {
            data.params = Default::default();
        }
        data.service = Some(service);
        data.title = Some(title);
        Ok(data.title().is_some())
    }

    /// Loads the parameter form of a node and lines its values up with it.
    ///
    /// Returns the schema so the caller can render the form.
    pub async fn configure(
        &mut self,
        node_id: &str,
        backend: &dyn TaskBackend,
    ) -> Result<Vec<ParamSpec>, EditorError> {
        let node = self
            .store
            .node(node_id)
            .ok_or_else(|| EditorError::NodeNotFound(node_id.to_string()))?;
        let title = node
            .data
            .title()
            .ok_or_else(|| EditorError::SetupIncomplete(node_id.to_string()))?
            .to_string();
        let scope = node.kind.scope();

        let schema = backend.params_schema(scope, &title).await?;

        let data = self
            .store
            .node_data_mut(node_id)
            .ok_or_else(|| EditorError::NodeNotFound(node_id.to_string()))?;
        data.params = data.params.conform(&schema);
        debug!(node_id, fields = schema.len(), "configured node");
        Ok(schema)
    }

    pub fn set_param(
        &mut self,
        node_id: &str,
        id: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), EditorError> {
        let data = self
            .store
            .node_data_mut(node_id)
            .ok_or_else(|| EditorError::NodeNotFound(node_id.to_string()))?;
        data.params.set(id, value);
        Ok(())
    }

    /// Whether the save action is offered.
    ///
    /// Stored tasks are read-only here, and free accounts stop at
    /// [`FREE_PLAN_TASK_LIMIT`] tasks.
    pub fn can_save(&self, plan: &Plan, user_task_count: usize) -> bool {
        if matches!(self.mode, EditorMode::Existing(_)) {
            return false;
        }
        !(plan.is_metered() && user_task_count >= FREE_PLAN_TASK_LIMIT)
    }

    pub async fn save(&self, submitter: &Submitter, account: &AccountContext) -> Feedback {
        submitter.submit(self.store.definition(), account).await
    }
}
