//! Database Tests
//!
//! CRUD tests for sessions and messages against a temporary SQLite file.

use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::agent::{ActionDescriptor, ActionKind, DocumentDetails};
use crate::database;
use crate::models::{role, AgentConfig};

async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("tempdir");
    let pool = database::init_db(&dir.path().join("test.sqlite"))
        .await
        .expect("init_db");
    (dir, pool)
}

fn sample_action() -> ActionDescriptor {
    ActionDescriptor {
        kind: ActionKind::DownloadPpt,
        payload: DocumentDetails {
            title: "The Water Cycle".to_string(),
            content: "Evaporation, condensation, precipitation.".to_string(),
            sections: vec!["Overview".to_string()],
        },
    }
}

#[tokio::test]
async fn test_create_and_get_session() {
    let (_dir, pool) = test_pool().await;

    let created = database::create_session(&pool, "Revision", AgentConfig::default())
        .await
        .expect("create_session");
    assert_eq!(created.title, "Revision");
    assert_eq!(created.agent_config.0.model_id, "studymate-default");

    let fetched = database::get_session(&pool, &created.id)
        .await
        .expect("get_session");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn test_get_all_sessions_newest_first() {
    let (_dir, pool) = test_pool().await;

    database::create_session(&pool, "first", AgentConfig::default())
        .await
        .expect("create first");
    database::create_session(&pool, "second", AgentConfig::default())
        .await
        .expect("create second");

    let sessions = database::get_all_sessions(&pool).await.expect("list");
    assert_eq!(sessions.len(), 2);
}

#[tokio::test]
async fn test_messages_are_append_only_and_ordered() {
    let (_dir, pool) = test_pool().await;
    let session = database::create_session(&pool, "chat", AgentConfig::default())
        .await
        .expect("session");

    database::add_message(&pool, &session.id, role::USER, "hello", None)
        .await
        .expect("user message");
    database::add_message(&pool, &session.id, role::AGENT, "hi", None)
        .await
        .expect("agent message");
    database::add_message(&pool, &session.id, role::USER, "make a ppt", None)
        .await
        .expect("second user message");

    let messages = database::get_session_messages(&pool, &session.id)
        .await
        .expect("messages");
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].content, "hello");
    assert_eq!(messages[0].role, role::USER);
    assert_eq!(messages[1].role, role::AGENT);
    assert_eq!(messages[2].content, "make a ppt");
    assert!(messages[0].id < messages[1].id && messages[1].id < messages[2].id);
}

#[tokio::test]
async fn test_action_descriptor_round_trips_through_json_column() {
    let (_dir, pool) = test_pool().await;
    let session = database::create_session(&pool, "chat", AgentConfig::default())
        .await
        .expect("session");

    let action = sample_action();
    let stored = database::add_message(&pool, &session.id, role::AGENT, "done", Some(&action))
        .await
        .expect("message with action");
    assert_eq!(stored.action.as_ref().expect("action stored").0, action);

    let messages = database::get_session_messages(&pool, &session.id)
        .await
        .expect("messages");
    let fetched = messages[0].action.as_ref().expect("action fetched");
    assert_eq!(fetched.0, action);
    assert_eq!(fetched.0.kind, ActionKind::DownloadPpt);
}

#[tokio::test]
async fn test_messages_without_action_load_as_none() {
    let (_dir, pool) = test_pool().await;
    let session = database::create_session(&pool, "chat", AgentConfig::default())
        .await
        .expect("session");

    database::add_message(&pool, &session.id, role::USER, "plain", None)
        .await
        .expect("message");

    let messages = database::get_session_messages(&pool, &session.id)
        .await
        .expect("messages");
    assert!(messages[0].action.is_none());
}

#[tokio::test]
async fn test_messages_scoped_to_session() {
    let (_dir, pool) = test_pool().await;
    let a = database::create_session(&pool, "a", AgentConfig::default())
        .await
        .expect("a");
    let b = database::create_session(&pool, "b", AgentConfig::default())
        .await
        .expect("b");

    database::add_message(&pool, &a.id, role::USER, "for a", None)
        .await
        .expect("msg a");

    let messages = database::get_session_messages(&pool, &b.id)
        .await
        .expect("messages b");
    assert!(messages.is_empty());
}
