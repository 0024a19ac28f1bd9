use thiserror::Error;

/// Errors that can occur while walking the flow graph into a trigger-first sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinearizeError {
    #[error("No root node found: every node is the target of an edge")]
    NoRootNode,

    #[error("Node '{node_id}' has {count} outgoing connections, but a flow can only continue along one")]
    Branching { node_id: String, count: usize },

    #[error("The flow loops back to node '{node_id}'")]
    Cycle { node_id: String },
}

/// Errors that can occur while turning a flow into a task payload.
///
/// Every variant is a local precondition failure: it is raised before any
/// request reaches the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Linearize(#[from] LinearizeError),

    #[error("Please connect at least two nodes")]
    NotEnoughNodes { found: usize },

    #[error("You can only have one reaction per flow on the {plan} plan")]
    PlanLimit { plan: String, reactions: usize },

    #[error("The trigger node has no trigger selected")]
    MissingTrigger,

    #[error("The reaction node has no reaction selected")]
    MissingReaction,

    #[error("Node '{node_id}' has no service selected")]
    MissingService { node_id: String },

    #[error("Not logged in to all services (missing a token for '{service}')")]
    MissingServiceToken { service: String },
}

/// Errors that can occur when converting a custom editor format into a `FlowDefinition`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowConversionError {
    #[error("Invalid flow data: {0}")]
    ValidationError(String),

    #[error("Failed to parse flow JSON: {0}")]
    JsonParseError(String),
}

/// Errors returned by the backend client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error or server is unreachable: {0}")]
    Unreachable(String),

    #[error("Request rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("User is not authenticated")]
    NotAuthenticated,

    #[error("Failed to set up the HTTP client: {0}")]
    Client(String),
}

impl ApiError {
    /// The backend's own explanation, when it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

/// Errors raised by the editor session outside of compilation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Node '{0}' not found in the flow")]
    NodeNotFound(String),

    #[error("Node '{0}' must have a trigger or reaction selected before it can be configured")]
    SetupIncomplete(String),

    #[error(transparent)]
    Conversion(#[from] FlowConversionError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors raised while resolving client configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}
