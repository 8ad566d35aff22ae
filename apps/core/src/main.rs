// StudyMate CLI entry point.
// One interactive chat session per run; replies come from the rule-based
// agent, or verbatim from an external model when one is configured.

use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use studymate_core::agent::{responder::GREETING, ActionDescriptor, ConversationContext, StudyAgent};
use studymate_core::database;
use studymate_core::export::{self, DocumentRequest};
use studymate_core::fs_manager::PortablePaths;
use studymate_core::llm::FALLBACK_APOLOGY;
use studymate_core::models::{role, AgentConfig};
use studymate_core::settings::Settings;

/// Fixed pacing delay before each reply, purely a UX nicety.
const TYPING_DELAY: Duration = Duration::from_millis(600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    PortablePaths::init().context("failed to initialize data directories")?;
    let settings = Settings::from_env()?;

    let db_path = settings
        .db_path
        .clone()
        .unwrap_or_else(|| PortablePaths::db_dir().join("studymate.sqlite"));
    let pool = database::init_db(&db_path).await?;

    let export_dir = settings
        .export_dir
        .clone()
        .unwrap_or_else(PortablePaths::exports_dir);

    let session = database::create_session(&pool, "New session", AgentConfig::default()).await?;
    let agent = StudyAgent::new();
    let llm = settings.llm_client()?;

    println!("{}\n", GREETING);
    println!("(Type /download to save a pending document, /quit to exit.)\n");
    database::add_message(&pool, &session.id, role::AGENT, GREETING, None).await?;

    let mut context = ConversationContext::new();
    let mut pending_action: Option<ActionDescriptor> = None;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/quit" {
            break;
        }

        if input == "/download" {
            match pending_action.take() {
                Some(action) => {
                    let request = DocumentRequest::from(&action.payload);
                    match export::write_document(&export_dir, action.kind.document_kind(), &request)
                    {
                        Ok(path) => {
                            println!("Saved: {}\n", path.display());
                        }
                        Err(e) => {
                            warn!("document export failed: {}", e);
                            println!(
                                "There was an error generating the file. Please try again or provide more details.\n"
                            );
                        }
                    }
                }
                None => println!("There's no document waiting to be downloaded.\n"),
            }
            continue;
        }

        database::add_message(&pool, &session.id, role::USER, input, None).await?;
        tokio::time::sleep(TYPING_DELAY).await;

        let (text, action) = match &llm {
            Some(client) => match client.complete(input).await {
                Ok(text) => (text, None),
                Err(e) => {
                    warn!("external model call failed: {}", e);
                    (FALLBACK_APOLOGY.to_string(), None)
                }
            },
            None => {
                let reply = agent.respond(input, &context);
                context = reply.new_context;
                (reply.text, reply.action)
            }
        };

        database::add_message(&pool, &session.id, role::AGENT, &text, action.as_ref()).await?;
        println!("{}\n", text);

        if let Some(action) = action {
            println!("[Type /download to save the {}]\n", export::file_name(
                action.kind.document_kind(),
                &action.payload.title
            ));
            pending_action = Some(action);
        }
    }

    Ok(())
}
