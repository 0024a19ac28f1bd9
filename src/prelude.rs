//! Prelude module for convenient imports
//!
//! Re-exports the types needed to build, compile and submit flows.
//!
//! # Example
//!
//! ```rust,no_run
//! use areaflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let flow_json = std::fs::read_to_string("path/to/flow.json")?;
//! let flow = FlowDefinition::from_json(&flow_json)?;
//!
//! let sequence = linearize(&flow)?;
//! for node in sequence {
//!     println!("{} -> {:?}", node.id, node.data.title());
//! }
//! # Ok(())
//! # }
//! ```

// Flow model
pub use crate::flow::{
    FlowDefinition, FlowEdge, FlowNode, FlowStore, IntoFlow, NodeData, NodeKind, ParamList,
    ParamScope, ParamSpec, Position,
};

// Compilation
pub use crate::compiler::{CompiledTask, CompileWarning, TaskCompiler, linearize};

// Backend access
pub use crate::api::{HttpBackend, Plan, TaskBackend, TaskPayload, TaskRecord};
pub use crate::config::{BackendConfig, Platform};
pub use crate::session::{AccountContext, ServiceTokens, Session};

// Editing and submission
pub use crate::editor::{EditorMode, EditorSession};
pub use crate::submit::{Feedback, FeedbackKind, Route, Submitter};

// Error types
pub use crate::error::{ApiError, CompileError, EditorError, FlowConversionError, LinearizeError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
