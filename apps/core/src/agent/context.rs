//! Conversation context threaded between turns.
//!
//! A flat record carrying the previously assigned intent, the requested
//! document format, and the details collected so far. Replaced wholesale
//! after each turn; never persisted past the session.

use serde::{Deserialize, Serialize};

use super::intent::{DocumentKind, Intent};

/// Details collected for a document-creation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDetails {
    /// The document title (trimmed, pre-period, at most 100 characters).
    pub title: String,
    /// The body content, usually the user's raw detail message.
    pub content: String,
    /// Section headings; defaults to Introduction / Main Content / Conclusion.
    pub sections: Vec<String>,
}

impl DocumentDetails {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty() && self.sections.is_empty()
    }
}

/// The carried-over record of the conversation's current goal.
///
/// Invariant: `details_provided` is true if and only if `details` is
/// present and non-empty. The constructors enforce this; the fields are
/// private so it cannot be broken from outside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    prior_intent: Option<Intent>,
    document_kind: Option<DocumentKind>,
    details_provided: bool,
    details: Option<DocumentDetails>,
}

impl ConversationContext {
    /// Empty context, used at conversation start and for stateless turns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a single-turn intent with no document flow attached.
    pub fn for_intent(intent: Intent) -> Self {
        Self {
            prior_intent: Some(intent),
            ..Self::default()
        }
    }

    /// Document flow waiting for the user's next message to supply details.
    pub fn awaiting_details(kind: DocumentKind) -> Self {
        Self {
            prior_intent: Some(Intent::Document),
            document_kind: Some(kind),
            details_provided: false,
            details: None,
        }
    }

    /// Document flow with details captured. Empty details leave the flag
    /// unset so the invariant holds.
    pub fn with_details(kind: DocumentKind, details: DocumentDetails) -> Self {
        let details_provided = !details.is_empty();
        Self {
            prior_intent: Some(Intent::Document),
            document_kind: Some(kind),
            details_provided,
            details: if details_provided { Some(details) } else { None },
        }
    }

    pub fn prior_intent(&self) -> Option<Intent> {
        self.prior_intent
    }

    pub fn document_kind(&self) -> Option<DocumentKind> {
        self.document_kind
    }

    pub fn details_provided(&self) -> bool {
        self.details_provided
    }

    pub fn details(&self) -> Option<&DocumentDetails> {
        self.details.as_ref()
    }

    /// True when a document flow is pending and the next message must be
    /// treated as the detail payload, regardless of its own keywords.
    pub fn is_awaiting_details(&self) -> bool {
        self.prior_intent == Some(Intent::Document) && !self.details_provided
    }
}
