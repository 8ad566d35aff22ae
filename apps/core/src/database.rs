use std::path::Path;
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use tracing::info;
use uuid::Uuid;

use crate::agent::ActionDescriptor;
use crate::error::AppError;
use crate::models::{AgentConfig, Message, Session};

/// Open (creating if needed) the SQLite database at `db_path` and apply
/// the schema.
pub async fn init_db(db_path: &Path) -> Result<SqlitePool, AppError> {
    let db_url = format!("sqlite://{}", db_path.to_string_lossy());
    info!("Initializing database at: {}", db_url);

    let options = SqliteConnectOptions::from_str(&db_url)
        .map_err(AppError::Database)?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    info!("Database initialized and migrations applied.");

    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            agent_config TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id TEXT NOT NULL,
            role TEXT NOT NULL,
            content TEXT NOT NULL,
            action TEXT,
            created_at INTEGER NOT NULL,
            FOREIGN KEY(session_id) REFERENCES sessions(id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

// --- Sessions CRUD ---

pub async fn create_session(
    pool: &SqlitePool,
    title: &str,
    agent_config: AgentConfig,
) -> Result<Session, AppError> {
    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now().timestamp();
    let config_json = Json(agent_config);

    let session = sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (id, title, created_at, agent_config)
        VALUES (?, ?, ?, ?)
        RETURNING id, title, created_at, agent_config
        "#,
    )
    .bind(&id)
    .bind(title)
    .bind(created_at)
    .bind(config_json)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

pub async fn get_session(pool: &SqlitePool, id: &str) -> Result<Session, AppError> {
    let session = sqlx::query_as::<_, Session>(
        r#"
        SELECT id, title, created_at, agent_config
        FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

pub async fn get_all_sessions(pool: &SqlitePool) -> Result<Vec<Session>, AppError> {
    let sessions = sqlx::query_as::<_, Session>(
        r#"
        SELECT id, title, created_at, agent_config
        FROM sessions
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

// --- Messages CRUD ---

/// Append a message to a session. Agent replies may carry a download
/// action descriptor, stored as a JSON column.
pub async fn add_message(
    pool: &SqlitePool,
    session_id: &str,
    role: &str,
    content: &str,
    action: Option<&ActionDescriptor>,
) -> Result<Message, AppError> {
    let created_at = Utc::now().timestamp();
    let action_json = action.cloned().map(Json);

    let message = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (session_id, role, content, action, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, session_id, role, content, action, created_at
        "#,
    )
    .bind(session_id)
    .bind(role)
    .bind(content)
    .bind(action_json)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

pub async fn get_session_messages(
    pool: &SqlitePool,
    session_id: &str,
) -> Result<Vec<Message>, AppError> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, session_id, role, content, action, created_at
        FROM messages
        WHERE session_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}
