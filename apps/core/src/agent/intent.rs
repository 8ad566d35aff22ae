//! Intent classification over an ordered keyword rule list.
//!
//! Fast substring-based detection. No ML model required: the classifier
//! scans a fixed ordered list of (keywords, intent) rules and the first
//! matching rule wins, with an explicit default arm.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category assigned to a user's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Previous-year-question analysis (pyq, previous year, past paper)
    Pyq,
    /// Document creation (pdf, word, ppt, report, create, generate)
    Document,
    /// Summarization request (summarize, summary, notes)
    Summary,
    /// Image/diagram guidance (image, picture, diagram, illustration)
    Image,
    /// General academic question (what, how, why, explain, ?)
    Question,
    /// Default: generic "how can I help" assistance
    Help,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns a human-readable label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Pyq => "pyq",
            Intent::Document => "document",
            Intent::Summary => "summary",
            Intent::Image => "image",
            Intent::Question => "question",
            Intent::Help => "help",
        }
    }
}

/// Requested output format for a document-creation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Word,
    Ppt,
}

impl DocumentKind {
    /// Uppercase label used in user-facing confirmation text.
    pub fn as_upper(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Word => "WORD",
            DocumentKind::Ppt => "PPT",
        }
    }

    /// File extension for the generated document.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Word => "docx",
            DocumentKind::Ppt => "pptx",
        }
    }

    /// Detect the requested format from lowercased text.
    ///
    /// Precedence: ppt/presentation/powerpoint > word/doc > default pdf.
    /// Note that "doc" is a substring match, so "document" selects Word.
    pub fn detect(text: &str) -> Self {
        let text = text.to_lowercase();
        if contains_any(&text, &["ppt", "presentation", "powerpoint"]) {
            DocumentKind::Ppt
        } else if contains_any(&text, &["word", "doc"]) {
            DocumentKind::Word
        } else {
            DocumentKind::Pdf
        }
    }
}

/// One rule of the ordered predicate chain: if any keyword is a substring
/// of the lowercased input, the rule's intent is assigned.
struct IntentRule {
    intent: Intent,
    keywords: &'static [&'static str],
}

/// Ordered rule list. Earlier rules win ties by construction.
const RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Pyq,
        keywords: &["pyq", "previous year", "past paper"],
    },
    IntentRule {
        intent: Intent::Document,
        keywords: &[
            "pdf",
            "document",
            "report",
            "word",
            "ppt",
            "presentation",
            "create",
            "generate",
            "make",
        ],
    },
    IntentRule {
        intent: Intent::Summary,
        keywords: &["summarize", "summary", "notes"],
    },
    IntentRule {
        intent: Intent::Image,
        keywords: &["image", "picture", "diagram", "illustration"],
    },
    IntentRule {
        intent: Intent::Question,
        keywords: &["what", "how", "why", "explain", "?"],
    },
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Intent classifier over the fixed rule list.
///
/// Total function: always returns an intent, defaulting to [`Intent::Help`].
#[derive(Debug, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify the intent of a text. First matching rule wins.
    pub fn classify(&self, text: &str) -> Intent {
        let text = text.to_lowercase();

        for rule in RULES {
            if contains_any(&text, rule.keywords) {
                return rule.intent;
            }
        }

        Intent::Help
    }
}
