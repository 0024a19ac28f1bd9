use super::definition::{FlowDefinition, FlowEdge, FlowNode, NodeData, NodeKind};
use super::params::ParamList;
use super::store::{SEED_ACTION_ID, SEED_TRIGGER_ID};
use super::template::{Template, service_from_reaction};
use crate::api::types::TaskRecord;
use crate::compiler::arguments::ProjectContext;
use crate::error::FlowConversionError;

/// A trait for data models that can be converted into a `FlowDefinition`.
///
/// This is the extension point for feeding the task compiler from formats
/// other than the editor's own JSON: stored tasks, templates, or a
/// different graph widget's export.
///
/// # Example
///
/// ```rust,no_run
/// use areaflow::prelude::*;
///
/// struct Rule { when: String, then: String }
///
/// impl IntoFlow for Rule {
///     fn into_flow(self) -> std::result::Result<FlowDefinition, FlowConversionError> {
///         Ok(FlowDefinition {
///             nodes: vec![
///                 FlowNode::new("1", NodeKind::Trigger, NodeData::new("github", self.when)),
///                 FlowNode::new("2", NodeKind::Action, NodeData::new("common", self.then)),
///             ],
///             edges: vec![FlowEdge::between("1", "2")],
///         })
///     }
/// }
/// ```
pub trait IntoFlow {
    /// Consumes the object and converts it into a flow graph.
    fn into_flow(self) -> Result<FlowDefinition, FlowConversionError>;
}

impl FlowDefinition {
    /// Parses the editor's JSON export.
    pub fn from_json(json: &str) -> Result<Self, FlowConversionError> {
        serde_json::from_str(json).map_err(|e| FlowConversionError::JsonParseError(e.to_string()))
    }
}

fn seed_pair(trigger: NodeData, reaction: NodeData) -> FlowDefinition {
    FlowDefinition {
        nodes: vec![
            FlowNode::new(SEED_TRIGGER_ID, NodeKind::Trigger, trigger).at(300.0, 150.0),
            FlowNode::new(SEED_ACTION_ID, NodeKind::Action, reaction).at(350.0, 350.0),
        ],
        edges: vec![FlowEdge::between(SEED_TRIGGER_ID, SEED_ACTION_ID)],
    }
}

impl IntoFlow for &Template {
    fn into_flow(self) -> Result<FlowDefinition, FlowConversionError> {
        Ok(seed_pair(
            NodeData::new(self.trigger_service, self.trigger),
            NodeData::new(self.reaction_service, self.reaction),
        ))
    }
}

/// Undoes the backend's storage rewrite of the "specific person" email triggers.
///
/// `email_received_from_person` is stored as `email_received` with a
/// trailing `only_from` marker, and `email_sent_to_person` as `email_sent`
/// with `only_to`.
fn restore_trigger(trigger: &str, mut args: Vec<String>) -> (String, Vec<String>) {
    let restored = match (trigger, args.last().map(String::as_str)) {
        ("email_received", Some("only_from")) => Some("email_received_from_person"),
        ("email_sent", Some("only_to")) => Some("email_sent_to_person"),
        _ => None,
    };
    match restored {
        Some(name) => {
            args.pop();
            (name.to_string(), args)
        }
        None => (trigger.to_string(), args),
    }
}

impl IntoFlow for TaskRecord {
    fn into_flow(self) -> Result<FlowDefinition, FlowConversionError> {
        if self.trigger.is_empty() || self.action_name.is_empty() {
            return Err(FlowConversionError::ValidationError(format!(
                "Task {} has no trigger or no reaction",
                self.id
            )));
        }

        let (trigger, args) = restore_trigger(&self.trigger, self.trigger_args.unwrap_or_default());
        let args = ProjectContext::default().strip(&trigger, args);

        let trigger_data = NodeData {
            service: self.service,
            title: Some(trigger),
            params: ParamList::from_positional(args),
        };
        let reaction_data = NodeData {
            service: service_from_reaction(&self.action_name).map(str::to_string),
            title: Some(self.action_name),
            params: ParamList::from_positional(self.action_params.unwrap_or_default()),
        };
        Ok(seed_pair(trigger_data, reaction_data))
    }
}
