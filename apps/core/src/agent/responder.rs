//! Study agent orchestrator.
//!
//! Thin front over the pipeline: classify, then compose. One call per
//! user turn; the caller threads the returned context into the next turn.

use tracing::debug;

use super::composer::{self, AgentReply};
use super::context::ConversationContext;
use super::intent::IntentClassifier;

/// Session greeting shown before the first user turn.
pub const GREETING: &str = "Hello! I'm your StudyMate agent. I can help you with:\n\n\
- PYQ Analysis - I'll analyze patterns and predict questions\n\
- Create Documents (PDF, Word, PPT) - Just tell me the topic!\n\
- Summarize Notes - Paste your content\n\
- Answer Questions - Ask me anything!\n\n\
What would you like help with?";

/// Rule-based dialogue engine: classifier + composer.
#[derive(Debug, Default)]
pub struct StudyAgent {
    classifier: IntentClassifier,
}

impl StudyAgent {
    pub fn new() -> Self {
        Self {
            classifier: IntentClassifier::new(),
        }
    }

    /// Run the full pipeline for one turn. Pure with respect to inputs:
    /// the same (text, context) pair always yields the same reply.
    pub fn respond(&self, text: &str, context: &ConversationContext) -> AgentReply {
        let intent = self.classifier.classify(text);
        debug!(intent = %intent, awaiting = context.is_awaiting_details(), "classified turn");
        composer::compose(text, context, intent)
    }
}
