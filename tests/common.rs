//! Common test utilities for building flows, accounts and an in-memory backend.
use areaflow::api::{ApiMessage, TaskBackend};
use areaflow::error::ApiError;
use areaflow::prelude::*;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::result::Result;

/// A trigger node with the given service, trigger and parameters.
#[allow(dead_code)]
pub fn trigger(id: &str, service: &str, title: &str, params: &[(&str, &str)]) -> FlowNode {
    FlowNode::new(
        id,
        NodeKind::Trigger,
        NodeData::new(service, title).with_params(params.iter().copied().collect()),
    )
}

/// A reaction node with the given service, reaction and parameters.
#[allow(dead_code)]
pub fn action(id: &str, service: &str, title: &str, params: &[(&str, &str)]) -> FlowNode {
    FlowNode::new(
        id,
        NodeKind::Action,
        NodeData::new(service, title).with_params(params.iter().copied().collect()),
    )
}

/// An empty node that has not been set up yet.
#[allow(dead_code)]
pub fn blank(id: &str, kind: NodeKind) -> FlowNode {
    FlowNode::new(id, kind, NodeData::default())
}

/// Flow: github push_event -> common send_email.
#[allow(dead_code)]
pub fn create_simple_flow() -> FlowDefinition {
    FlowDefinition {
        nodes: vec![
            trigger("1", "github", "push_event", &[("repo", "area"), ("branch", "main")]),
            action("2", "common", "send_email", &[("to", "me@example.com")]),
        ],
        edges: vec![FlowEdge::between("1", "2")],
    }
}

/// Flow: google email_received -> common send_sms -> reddit post_new_submission.
#[allow(dead_code)]
pub fn create_chained_flow() -> FlowDefinition {
    FlowDefinition {
        nodes: vec![
            trigger("1", "google", "email_received", &[("city", "Paris"), ("unit", "metric")]),
            action("2", "common", "send_sms", &[("to", "+33600000000")]),
            action("3", "reddit", "post_new_submission", &[("subreddit", "rust")]),
        ],
        edges: vec![FlowEdge::between("1", "2"), FlowEdge::between("2", "3")],
    }
}

/// A free account with both OAuth services connected.
#[allow(dead_code)]
pub fn free_account() -> AccountContext {
    let mut tokens = ServiceTokens::new();
    tokens.insert("github", "gho_test");
    tokens.insert("google", "ya29.test");
    AccountContext {
        user_id: 42,
        plan: Plan::Free,
        tokens,
    }
}

#[allow(dead_code)]
pub fn paid_account() -> AccountContext {
    AccountContext {
        plan: Plan::Paid("pro".to_string()),
        ..free_account()
    }
}

/// A `TaskBackend` that records what it receives and answers from memory.
#[derive(Default)]
#[allow(dead_code)]
pub struct MockBackend {
    pub created: Mutex<Vec<TaskPayload>>,
    pub reject_with: Option<ApiError>,
    pub tasks: Vec<TaskRecord>,
    pub schemas: Vec<(String, Vec<ParamSpec>)>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(error: ApiError) -> Self {
        Self {
            reject_with: Some(error),
            ..Self::default()
        }
    }

    pub fn with_task(mut self, task: TaskRecord) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn with_schema(mut self, identifier: &str, schema: Vec<ParamSpec>) -> Self {
        self.schemas.push((identifier.to_string(), schema));
        self
    }

    pub fn create_calls(&self) -> usize {
        self.created.lock().len()
    }
}

#[async_trait]
impl TaskBackend for MockBackend {
    async fn create_task(&self, payload: &TaskPayload) -> Result<ApiMessage, ApiError> {
        self.created.lock().push(payload.clone());
        match &self.reject_with {
            Some(error) => Err(error.clone()),
            None => Ok(ApiMessage {
                message: "Task created successfully".to_string(),
            }),
        }
    }

    async fn delete_task(&self, _task_id: u64) -> Result<ApiMessage, ApiError> {
        Ok(ApiMessage {
            message: "Task deleted successfully".to_string(),
        })
    }

    async fn get_task(&self, task_id: u64) -> Result<TaskRecord, ApiError> {
        self.tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or(ApiError::Rejected {
                status: 404,
                detail: "Task not found".to_string(),
            })
    }

    async fn user_tasks(&self, user_id: u64) -> Result<Vec<TaskRecord>, ApiError> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn params_schema(
        &self,
        _scope: ParamScope,
        identifier: &str,
    ) -> Result<Vec<ParamSpec>, ApiError> {
        Ok(self
            .schemas
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, schema)| schema.clone())
            .unwrap_or_default())
    }

    async fn services(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["common".to_string(), "github".to_string(), "google".to_string()])
    }

    async fn services_with(&self, _scope: ParamScope) -> Result<Vec<String>, ApiError> {
        self.services().await
    }

    async fn events(&self, _service: &str) -> Result<Vec<String>, ApiError> {
        Ok(Vec::new())
    }

    async fn reactions(&self, _service: &str) -> Result<Vec<String>, ApiError> {
        Ok(Vec::new())
    }
}

/// A text field of a parameter schema.
#[allow(dead_code)]
pub fn text_field(id: &str, label: &str) -> ParamSpec {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "type": "text",
        "label": label,
        "placeholder": ""
    }))
    .expect("valid param spec")
}
