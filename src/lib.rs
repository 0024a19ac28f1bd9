//! # areaflow - Automation Flow Compiler and Backend Client
//!
//! **areaflow** turns the node graphs drawn in an "if this then that" flow
//! editor into tasks for the automation backend. A flow is a small graph of
//! one trigger node followed by reaction nodes; the crate walks it into a
//! trigger-first sequence, checks it against the user's plan and connected
//! services, and builds the positional task payload the backend expects.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Flow**: Parse the editor's JSON export with `FlowDefinition::from_json`,
//!     or implement the `IntoFlow` trait for your own format.
//! 2.  **Describe the Account**: Build an `AccountContext` from the signed-in user's profile.
//!     It carries the user id, the billing plan and the OAuth tokens per service.
//! 3.  **Compile**: Use `TaskCompiler::builder` to turn the flow into a `TaskPayload`.
//!     Every precondition failure is reported here, before any request is made.
//! 4.  **Submit**: Hand the flow to a `Submitter` backed by an `HttpBackend`. It posts the task
//!     and returns the `Feedback` to show the user.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use areaflow::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<()> {
//! let flow = FlowDefinition {
//!     nodes: vec![
//!         FlowNode::new("1", NodeKind::Trigger, NodeData::new("github", "push_event")
//!             .with_params([("repo", "area"), ("branch", "main")].into_iter().collect())),
//!         FlowNode::new("2", NodeKind::Action, NodeData::new("common", "send_email")
//!             .with_params([("to", "me@example.com")].into_iter().collect())),
//!     ],
//!     edges: vec![FlowEdge::between("1", "2")],
//! };
//!
//! // Compile locally to inspect the payload.
//! let mut tokens = ServiceTokens::new();
//! tokens.insert("github", "gho_token");
//! let account = AccountContext { user_id: 1, plan: Plan::Free, tokens };
//!
//! let compiled = TaskCompiler::builder(flow.clone(), account.clone()).build().compile()?;
//! println!("{}", serde_json::to_string_pretty(&compiled.payload)?);
//!
//! // Or send it straight to the backend.
//! let session = Session::with_token("jwt");
//! let backend = HttpBackend::new(BackendConfig::from_env(Platform::Web)?, session)?;
//! let feedback = Submitter::new(Arc::new(backend)).submit(&flow, &account).await;
//! println!("{}: {}", feedback.title, feedback.message);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod compiler;
pub mod config;
pub mod editor;
pub mod error;
pub mod flow;
pub mod naming;
pub mod prelude;
pub mod session;
pub mod submit;
