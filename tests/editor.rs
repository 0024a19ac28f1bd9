//! Tests for editor sessions: opening, setting up and configuring nodes.
mod common;
use areaflow::editor::FREE_PLAN_TASK_LIMIT;
use areaflow::prelude::*;
use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn stored_task() -> TaskRecord {
    TaskRecord {
        id: 12,
        trigger: "email_sent".to_string(),
        trigger_args: Some(vec![
            "area-epitech-437409".to_string(),
            "Area-Epitech".to_string(),
            "boss@example.com".to_string(),
            "only_to".to_string(),
        ]),
        action_name: "post_new_submission".to_string(),
        action_params: Some(vec!["rust".to_string(), "Hello".to_string()]),
        user_id: 42,
        service: Some("google".to_string()),
        requires_oauth: true,
        oauth_token: None,
        event_hash: None,
    }
}

#[test]
fn test_mode_from_route() {
    assert_eq!(EditorMode::parse("new"), Some(EditorMode::New));
    assert_eq!(
        EditorMode::parse("template-3"),
        Some(EditorMode::Template("template-3".to_string()))
    );
    assert_eq!(EditorMode::parse("12"), Some(EditorMode::Existing(12)));
    assert_eq!(EditorMode::parse("settings"), None);
}

#[tokio::test]
async fn test_open_new_is_seeded() {
    let backend = MockBackend::new();
    let editor = EditorSession::open(EditorMode::New, &backend).await.unwrap();
    assert_eq!(editor.store().nodes().len(), 2);
    assert!(editor.store().nodes()[0].data.title().is_none());
}

#[tokio::test]
async fn test_open_template_prefills_nodes() {
    let backend = MockBackend::new();
    let editor = EditorSession::open(EditorMode::Template("template-1".to_string()), &backend)
        .await
        .unwrap();
    let nodes = editor.store().nodes();
    assert_eq!(nodes[0].data.service(), Some("google"));
    assert_eq!(nodes[0].data.title(), Some("email_received"));
    assert_eq!(nodes[1].data.title(), Some("send_sms"));
}

#[tokio::test]
async fn test_unknown_template_opens_blank_flow() {
    let backend = MockBackend::new();
    let editor = EditorSession::open(EditorMode::Template("template-99".to_string()), &backend)
        .await
        .unwrap();
    assert_eq!(editor.mode(), &EditorMode::Template("template-99".to_string()));
    assert_eq!(editor.store().definition(), FlowStore::seeded().definition());
    assert!(editor.store().nodes().iter().all(|n| n.data.title().is_none()));
}

#[tokio::test]
async fn test_open_existing_task_restores_flow() {
    let backend = MockBackend::new().with_task(stored_task());
    let editor = EditorSession::open(EditorMode::Existing(12), &backend)
        .await
        .unwrap();

    let trigger = &editor.store().nodes()[0].data;
    assert_eq!(trigger.title(), Some("email_sent_to_person"));
    assert_eq!(trigger.params.values().collect::<Vec<_>>(), vec!["boss@example.com"]);

    let reaction = &editor.store().nodes()[1].data;
    assert_eq!(reaction.service(), Some("reddit"));
    assert_eq!(reaction.params.values().collect::<Vec<_>>(), vec!["rust", "Hello"]);

    assert!(!editor.can_save(&Plan::Paid("pro".to_string()), 0));
}

#[tokio::test]
async fn test_open_missing_task_is_an_api_error() {
    let backend = MockBackend::new();
    let result = EditorSession::open(EditorMode::Existing(5), &backend).await;
    assert!(matches!(result, Err(EditorError::Api(ApiError::Rejected { status: 404, .. }))));
}

#[tokio::test]
async fn test_configure_requires_setup() {
    let backend = MockBackend::new();
    let mut editor = EditorSession::open(EditorMode::New, &backend).await.unwrap();
    assert_eq!(
        editor.configure("1", &backend).await.unwrap_err(),
        EditorError::SetupIncomplete("1".to_string())
    );
    assert_eq!(
        editor.configure("9", &backend).await.unwrap_err(),
        EditorError::NodeNotFound("9".to_string())
    );
}

#[tokio::test]
async fn test_setup_configure_and_save() {
    let backend = Arc::new(
        MockBackend::new()
            .with_schema(
                "push_event",
                vec![text_field("repo", "Repository"), text_field("branch", "Branch")],
            )
            .with_schema("send_email", vec![text_field("to", "Recipient")]),
    );
    let mut editor = EditorSession::open(EditorMode::New, backend.as_ref())
        .await
        .unwrap();

    assert!(editor.setup("1", "github", "push_event").unwrap());
    assert!(editor.setup("2", "common", "send_email").unwrap());

    let schema = editor.configure("1", backend.as_ref()).await.unwrap();
    assert_eq!(schema.len(), 2);
    editor.set_param("1", "branch", "main").unwrap();
    editor.set_param("1", "repo", "area").unwrap();
    editor.configure("2", backend.as_ref()).await.unwrap();
    editor.set_param("2", "to", "me@example.com").unwrap();

    // Values stay in schema order whatever order they were typed in.
    let trigger = &editor.store().node("1").unwrap().data;
    assert_eq!(trigger.params.values().collect::<Vec<_>>(), vec!["area", "main"]);

    let submitter = Submitter::new(backend.clone());
    let feedback = editor.save(&submitter, &free_account()).await;
    assert!(feedback.is_success());

    let created = backend.created.lock();
    assert_eq!(created[0].trigger_args, vec!["area", "main"]);
    assert_eq!(created[0].action_params, vec!["me@example.com"]);
}

#[tokio::test]
async fn test_changing_setup_clears_params() {
    let backend = MockBackend::new();
    let mut editor = EditorSession::open(EditorMode::New, &backend).await.unwrap();
    editor.setup("1", "github", "push_event").unwrap();
    editor.set_param("1", "repo", "area").unwrap();

    editor.setup("1", "github", "push_event").unwrap();
    assert_eq!(editor.store().node("1").unwrap().data.params.len(), 1);

    assert!(!editor.setup("1", "github", "").unwrap());
    assert!(editor.store().node("1").unwrap().data.params.is_empty());
}

#[tokio::test]
async fn test_free_plan_task_limit() {
    let backend = MockBackend::new();
    let editor = EditorSession::open(EditorMode::New, &backend).await.unwrap();
    assert!(editor.can_save(&Plan::Free, FREE_PLAN_TASK_LIMIT - 1));
    assert!(!editor.can_save(&Plan::Free, FREE_PLAN_TASK_LIMIT));
    assert!(editor.can_save(&Plan::Paid("pro".to_string()), 50));
}
