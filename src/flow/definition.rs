use super::params::ParamList;
use serde::{Deserialize, Serialize};

/// The complete definition of one automation as drawn in the editor.
/// This is the structure the task compiler consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDefinition {
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
}

impl FlowDefinition {
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

/// Whether a node starts the automation or reacts to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[serde(alias = "triggerNode")]
    Trigger,
    #[serde(alias = "actionNode")]
    Action,
}

impl NodeKind {
    /// The path segment the backend uses for parameter schemas of this kind.
    pub fn scope(self) -> ParamScope {
        match self {
            NodeKind::Trigger => ParamScope::Event,
            NodeKind::Action => ParamScope::Reaction,
        }
    }
}

/// The backend's name for the two sides of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamScope {
    Event,
    Reaction,
}

impl ParamScope {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamScope::Event => "event",
            ParamScope::Reaction => "reaction",
        }
    }

    /// Plural form used by the service catalog endpoints.
    pub fn plural(self) -> &'static str {
        match self {
            ParamScope::Event => "events",
            ParamScope::Reaction => "reactions",
        }
    }
}

/// Canvas coordinates. Ignored by everything but the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// What a node has been configured to do.
///
/// `service` and `title` are set by the setup step, `params` by the
/// configure step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub params: ParamList,
}

impl NodeData {
    pub fn new(service: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
            title: Some(title.into()),
            params: ParamList::new(),
        }
    }

    pub fn with_params(mut self, params: ParamList) -> Self {
        self.params = params;
        self
    }

    /// The selected trigger or reaction, if a non-empty one is set.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref().filter(|s| !s.is_empty())
    }
}

/// A single vertex of the flow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub data: NodeData,
    #[serde(default)]
    pub position: Position,
}

impl FlowNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, data: NodeData) -> Self {
        Self {
            id: id.into(),
            kind,
            data,
            position: Position::default(),
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl FlowEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// An edge named after its endpoints, the way the editor names connections.
    pub fn between(source: &str, target: &str) -> Self {
        Self::new(format!("e{}-{}", source, target), source, target)
    }
}
