//! Response composition.
//!
//! A pure function from (intent, context, text) to a display string plus
//! an optional action descriptor. No side effects; the caller renders the
//! text and invokes the document-export service when the user activates
//! the action. Identical inputs always produce identical output.

use serde::{Deserialize, Serialize};

use super::context::{ConversationContext, DocumentDetails};
use super::extract;
use super::intent::{DocumentKind, Intent};

/// Title used when a detail message yields no extractable title.
const FALLBACK_TITLE: &str = "Student Document";

/// Topics shorter than this are not enough to skip the detail prompt.
const MIN_INLINE_TOPIC_CHARS: usize = 10;

/// Downstream file-generation action the user may trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    DownloadPdf,
    DownloadWord,
    DownloadPpt,
}

impl From<DocumentKind> for ActionKind {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Pdf => ActionKind::DownloadPdf,
            DocumentKind::Word => ActionKind::DownloadWord,
            DocumentKind::Ppt => ActionKind::DownloadPpt,
        }
    }
}

impl ActionKind {
    pub fn document_kind(&self) -> DocumentKind {
        match self {
            ActionKind::DownloadPdf => DocumentKind::Pdf,
            ActionKind::DownloadWord => DocumentKind::Word,
            ActionKind::DownloadPpt => DocumentKind::Ppt,
        }
    }
}

/// Structured hint attached to a response indicating a file-generation
/// action, with the payload the export service needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub kind: ActionKind,
    pub payload: DocumentDetails,
}

/// One composed turn: display text, optional action, and the context to
/// carry into the next turn.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub text: String,
    pub action: Option<ActionDescriptor>,
    pub new_context: ConversationContext,
}

impl AgentReply {
    fn stateless(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: None,
            new_context: ConversationContext::new(),
        }
    }
}

/// Compose a reply for one turn.
///
/// The detail-capture rule runs first: when a document flow is awaiting
/// details, the whole message is the detail payload, overriding the
/// classified intent. (This can swallow an unrelated follow-up request;
/// preserved source behavior, flagged for product clarification.)
pub fn compose(text: &str, context: &ConversationContext, intent: Intent) -> AgentReply {
    if context.is_awaiting_details() {
        return capture_details(text, context);
    }

    match intent {
        Intent::Pyq => compose_pyq(text),
        Intent::Document => compose_document(text),
        Intent::Summary => AgentReply {
            text: SUMMARY_PROMPT.to_string(),
            action: None,
            new_context: ConversationContext::for_intent(Intent::Summary),
        },
        Intent::Image => AgentReply {
            text: IMAGE_GUIDANCE.to_string(),
            action: None,
            new_context: ConversationContext::for_intent(Intent::Help),
        },
        Intent::Question => compose_question(text),
        Intent::Help => AgentReply::stateless(HELP_OVERVIEW),
    }
}

/// The user is answering the detail prompt of a pending document flow.
fn capture_details(text: &str, context: &ConversationContext) -> AgentReply {
    let extracted = extract::extract_title(text);
    let title = if extracted.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        extracted
    };

    let details = DocumentDetails {
        title,
        content: text.to_string(),
        sections: extract::extract_sections(text),
    };

    let kind = context.document_kind().unwrap_or(DocumentKind::Pdf);
    let message = format!(
        "Perfect! I'll create a {} document for you titled \"{}\".\n\n\
         Click the download button below to get your document!",
        kind.as_upper(),
        details.title
    );

    AgentReply {
        text: message,
        action: Some(ActionDescriptor {
            kind: kind.into(),
            payload: details.clone(),
        }),
        new_context: ConversationContext::with_details(kind, details),
    }
}

fn compose_pyq(text: &str) -> AgentReply {
    let subject = extract::extract_subject(text);

    if subject.is_empty() {
        return AgentReply {
            text: PYQ_SUBJECT_PROMPT.to_string(),
            action: None,
            new_context: ConversationContext::for_intent(Intent::Pyq),
        };
    }

    AgentReply {
        text: format!("I'll help you analyze PYQ for {}!\n\n{}", subject, PYQ_ANALYSIS_BODY),
        action: None,
        new_context: ConversationContext::for_intent(Intent::Pyq),
    }
}

fn compose_document(text: &str) -> AgentReply {
    let kind = DocumentKind::detect(text);
    let topic = extract::extract_topic(text);

    // A long-enough inline topic lets the flow jump straight to Ready.
    if topic.chars().count() > MIN_INLINE_TOPIC_CHARS {
        let extracted = extract::extract_title(text);
        let title = if extracted.is_empty() {
            topic.chars().take(50).collect::<String>().trim().to_string()
        } else {
            extracted
        };

        let details = DocumentDetails {
            title,
            content: topic,
            sections: extract::extract_sections(text),
        };

        let message = format!(
            "Great! I'll create a {} document about \"{}\".\n\n\
             Click the download button below to get your document!",
            kind.as_upper(),
            details.title
        );

        return AgentReply {
            text: message,
            action: Some(ActionDescriptor {
                kind: kind.into(),
                payload: details.clone(),
            }),
            new_context: ConversationContext::with_details(kind, details),
        };
    }

    // AwaitingDetails: prompt for topic, content, and optional sections.
    AgentReply {
        text: format!(
            "I'll create a {} for you!\n\n\
             Please tell me:\n\
             1. What's the topic/title?\n\
             2. What should the content cover?\n\
             3. Any specific sections you want? (optional)\n\n\
             You can provide this all in your next message!",
            kind.as_upper()
        ),
        action: None,
        new_context: ConversationContext::awaiting_details(kind),
    }
}

fn compose_question(text: &str) -> AgentReply {
    let lowered = text.to_lowercase();

    if lowered.contains("photosynthesis") {
        return AgentReply::stateless(PHOTOSYNTHESIS_ANSWER);
    }
    if lowered.contains("newton") || lowered.contains("law of motion") {
        return AgentReply::stateless(NEWTON_ANSWER);
    }
    if lowered.contains("mitochondria") {
        return AgentReply::stateless(MITOCHONDRIA_ANSWER);
    }

    AgentReply::stateless(QUESTION_FALLBACK)
}

// --- Response templates ---

const PYQ_SUBJECT_PROMPT: &str = "I'll analyze Previous Year Questions for you! \
Which subject do you need help with?\n\n\
For example: Physics, Mathematics, Chemistry, Biology, etc.";

const PYQ_ANALYSIS_BODY: &str = "**Analysis Overview:**\n\n\
1. **Most Frequent Topics** (Last 5 years):\n\
   - Units and Measurements (18%)\n\
   - Motion in a Straight Line (15%)\n\
   - Laws of Motion (22%)\n\
   - Work, Energy & Power (20%)\n\
   - System of Particles (25%)\n\n\
2. **Question Pattern:**\n\
   - Short Answer (1-2 marks): 40%\n\
   - Long Answer (3-5 marks): 35%\n\
   - Numerical Problems: 25%\n\n\
3. **High Probability Questions:**\n\
   - Derive equations of motion\n\
   - Newton's laws applications\n\
   - Work-energy theorem problems\n\
   - Conservation of momentum\n\n\
4. **Predicted Questions:**\n\
   - Numerical on projectile motion\n\
   - Derivation of kinetic energy formula\n\
   - Problems on collision\n\n\
Would you like a detailed PDF report of this analysis?";

const SUMMARY_PROMPT: &str = "I'll summarize content for you! You can:\n\n\
1. **Paste your notes** directly in the next message\n\
2. **Upload files** from your resource library\n\
3. **Share a link** and I'll summarize the page\n\n\
What would you like to summarize?";

const IMAGE_GUIDANCE: &str = "I can help plan images! Please describe:\n\n\
- What type of image? (diagram, chart, illustration, etc.)\n\
- What should it show?\n\
- Any specific style or colors?\n\
- Size requirements?\n\n\
Note: image generation itself is not wired up; I'll guide you toward an \
AI image generator with a ready-to-use prompt.";

const PHOTOSYNTHESIS_ANSWER: &str = "**Photosynthesis** is the process by which green \
plants convert light energy into chemical energy.\n\n\
**Equation:**\n6CO2 + 6H2O + Light Energy -> C6H12O6 + 6O2\n\n\
**Key Points:**\n\
- Occurs in chloroplasts\n\
- Two stages: Light reactions and Calvin cycle\n\
- Produces glucose and oxygen\n\
- Essential for all life on Earth\n\n\
Would you like a detailed PDF report on photosynthesis?";

const NEWTON_ANSWER: &str = "**Newton's Laws of Motion:**\n\n\
**1st Law (Inertia):** An object remains at rest or in uniform motion unless \
acted upon by a force.\n\n\
**2nd Law (F=ma):** The acceleration of an object is directly proportional to \
the net force and inversely proportional to its mass.\n\n\
**3rd Law (Action-Reaction):** For every action, there is an equal and opposite \
reaction.\n\n\
Would you like practice problems or a PDF summary?";

const MITOCHONDRIA_ANSWER: &str = "**Mitochondria** - The powerhouse of the cell!\n\n\
**Functions:**\n\
- ATP production (cellular energy)\n\
- Cellular respiration\n\
- Regulates metabolic activity\n\n\
**Structure:**\n\
- Double membrane (outer and inner)\n\
- Cristae (folded inner membrane)\n\
- Matrix (contains enzymes)\n\n\
Fun fact: mitochondria have their own DNA!\n\nNeed more details or diagrams?";

const QUESTION_FALLBACK: &str = "I'd be happy to help answer that! However, for the \
best answer, could you:\n\n\
1. Be more specific about what you need\n\
2. Provide context (which subject/topic)\n\
3. Let me know if you need:\n\
   - A quick explanation\n\
   - Detailed notes\n\
   - Practice problems\n\
   - A PDF document\n\n\
Or ask me to create a document with comprehensive study materials!";

const HELP_OVERVIEW: &str = "I'm here to help! Here's what I can do:\n\n\
- **Create Documents** - \"Create a PDF about Artificial Intelligence\"\n\
- **PYQ Analysis** - \"Analyze PYQ for Physics\"\n\
- **Answer Questions** - \"Explain photosynthesis\" or \"What is Newton's law?\"\n\
- **Summarize Content** - \"Summarize these notes...\"\n\
- **Plan Images** - \"Create a diagram of...\"\n\n\
Just tell me what you need!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_capture_overrides_intent() {
        let ctx = ConversationContext::awaiting_details(DocumentKind::Word);

        // The message classifies as Pyq on its own, but the pending
        // document flow takes precedence.
        let reply = compose("Analyze PYQ for Physics", &ctx, Intent::Pyq);

        let action = reply.action.expect("detail capture must produce an action");
        assert_eq!(action.kind, ActionKind::DownloadWord);
        assert_eq!(action.payload.content, "Analyze PYQ for Physics");
        assert!(reply.new_context.details_provided());
    }

    #[test]
    fn test_detail_capture_fallback_title() {
        let ctx = ConversationContext::awaiting_details(DocumentKind::Pdf);
        let reply = compose("just some loose notes", &ctx, Intent::Help);

        let action = reply.action.expect("action expected");
        assert_eq!(action.payload.title, "Student Document");
    }

    #[test]
    fn test_document_with_inline_topic_is_ready() {
        let ctx = ConversationContext::new();
        let reply = compose(
            "Create a PDF about Machine Learning basics.",
            &ctx,
            Intent::Document,
        );

        let action = reply.action.expect("inline topic should skip the prompt");
        assert_eq!(action.kind, ActionKind::DownloadPdf);
        assert_eq!(action.payload.title, "Machine Learning basics");
        assert!(reply.text.contains("PDF"));
    }

    #[test]
    fn test_document_without_topic_awaits_details() {
        let ctx = ConversationContext::new();
        let reply = compose("make me a ppt", &ctx, Intent::Document);

        assert!(reply.action.is_none());
        assert!(reply.new_context.is_awaiting_details());
        assert_eq!(reply.new_context.document_kind(), Some(DocumentKind::Ppt));
        assert!(reply.text.contains("PPT"));
    }

    #[test]
    fn test_pyq_with_subject() {
        let ctx = ConversationContext::new();
        let reply = compose("Analyze PYQ for Physics", &ctx, Intent::Pyq);

        assert!(reply.text.starts_with("I'll help you analyze PYQ for Physics!"));
        assert_eq!(reply.new_context.prior_intent(), Some(Intent::Pyq));
    }

    #[test]
    fn test_pyq_without_subject_asks() {
        let ctx = ConversationContext::new();
        let reply = compose("show me pyq trends", &ctx, Intent::Pyq);

        assert!(reply.text.contains("Which subject"));
    }

    #[test]
    fn test_question_knowledge_base() {
        let ctx = ConversationContext::new();

        let reply = compose("Explain photosynthesis", &ctx, Intent::Question);
        assert!(reply.text.contains("chloroplasts"));
        assert_eq!(reply.new_context, ConversationContext::new());

        let reply = compose("What is Newton's law?", &ctx, Intent::Question);
        assert!(reply.text.contains("Inertia"));
    }

    #[test]
    fn test_compose_is_pure() {
        let ctx = ConversationContext::awaiting_details(DocumentKind::Pdf);

        let a = compose("Notes about gravity. sections: One, Two", &ctx, Intent::Help);
        let b = compose("Notes about gravity. sections: One, Two", &ctx, Intent::Help);

        assert_eq!(a, b);
    }
}
