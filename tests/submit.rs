//! Tests for the submission pipeline and the feedback it produces.
mod common;
use areaflow::error::ApiError;
use areaflow::prelude::*;
use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_successful_submit_navigates_to_dashboard() {
    let backend = Arc::new(MockBackend::new());
    let submitter = Submitter::new(backend.clone());

    let feedback = tokio_test::block_on(submitter.submit(&create_simple_flow(), &free_account()));

    assert!(feedback.is_success());
    assert_eq!(feedback.title, "Flow saved");
    assert_eq!(feedback.message, "Your flow has been saved successfully");
    assert_eq!(feedback.navigate, Some(Route::Dashboard));
    assert_eq!(backend.create_calls(), 1);
    assert_eq!(backend.created.lock()[0].trigger, "push_event");
}

#[test]
fn test_single_node_never_reaches_backend() {
    let backend = Arc::new(MockBackend::new());
    let submitter = Submitter::new(backend.clone());
    let flow = FlowDefinition {
        nodes: vec![trigger("1", "github", "push_event", &[])],
        edges: vec![],
    };

    let feedback = tokio_test::block_on(submitter.submit(&flow, &free_account()));

    assert_eq!(feedback.kind, FeedbackKind::Error);
    assert_eq!(feedback.title, "Failed to save flow");
    assert!(feedback.message.contains("connect at least two nodes"));
    assert_eq!(feedback.navigate, None);
    assert_eq!(backend.create_calls(), 0);
}

#[test]
fn test_plan_limit_never_reaches_backend() {
    let backend = Arc::new(MockBackend::new());
    let submitter = Submitter::new(backend.clone());

    let feedback = tokio_test::block_on(submitter.submit(&create_chained_flow(), &free_account()));

    assert_eq!(feedback.kind, FeedbackKind::Error);
    assert_eq!(
        feedback.message,
        "You can only have one reaction per flow on the free plan"
    );
    assert_eq!(backend.create_calls(), 0);
}

#[test]
fn test_paid_plan_saves_first_pair_with_warning() {
    let backend = Arc::new(MockBackend::new());
    let submitter = Submitter::new(backend.clone());

    let feedback = tokio_test::block_on(submitter.submit(&create_chained_flow(), &paid_account()));

    assert!(feedback.is_success());
    assert_eq!(
        feedback.warnings,
        vec!["Multiple reactions are not supported yet, only the first reaction will be saved"]
    );
    let created = backend.created.lock();
    assert_eq!(created[0].action_name, "send_sms");
}

#[test]
fn test_backend_rejection_shows_generic_error() {
    let backend = Arc::new(MockBackend::rejecting(ApiError::Rejected {
        status: 422,
        detail: "Invalid trigger args".to_string(),
    }));
    let submitter = Submitter::new(backend.clone());
    let flow = create_simple_flow();

    let feedback = tokio_test::block_on(submitter.submit(&flow, &free_account()));

    assert_eq!(feedback.kind, FeedbackKind::Error);
    assert_eq!(feedback.message, "An error occurred while saving your flow");
    assert_eq!(feedback.navigate, None);
    // One attempt, no retry.
    assert_eq!(backend.create_calls(), 1);
    assert_eq!(flow, create_simple_flow());
}

#[test]
fn test_unreachable_backend_says_so() {
    let backend = Arc::new(MockBackend::rejecting(ApiError::Unreachable(
        "connection refused".to_string(),
    )));
    let feedback = tokio_test::block_on(
        Submitter::new(backend).submit(&create_simple_flow(), &free_account()),
    );
    assert_eq!(feedback.title, "Failed to save flow");
    assert_eq!(feedback.message, "Network error or server is unreachable");
    assert!(!feedback.is_success());
}

#[test]
fn test_missing_trigger_shows_nothing() {
    let backend = Arc::new(MockBackend::new());
    let mut flow = create_simple_flow();
    flow.nodes[0].data.title = None;

    let feedback = tokio_test::block_on(Submitter::new(backend.clone()).submit(&flow, &free_account()));

    assert_eq!(feedback, Feedback::none());
    assert!(!feedback.is_shown());
    assert_eq!(backend.create_calls(), 0);
}

#[test]
fn test_missing_token_is_reported() {
    let backend = Arc::new(MockBackend::new());
    let feedback = tokio_test::block_on(
        Submitter::new(backend.clone()).submit(&create_simple_flow(), &AccountContext::default()),
    );
    assert!(feedback.message.starts_with("Not logged in to all services"));
    assert_eq!(backend.create_calls(), 0);
}
