//! Entity extraction helpers for the document and PYQ flows.
//!
//! Each extractor runs an ordered list of regex patterns and returns the
//! first non-empty capture, or an empty result if nothing matches.

use regex::Regex;
use std::sync::LazyLock;

/// Section headings used when the user does not name any.
pub const DEFAULT_SECTIONS: [&str; 3] = ["Introduction", "Main Content", "Conclusion"];

/// Maximum length of an extracted title, in characters.
const TITLE_MAX_CHARS: usize = 100;

/// Subjects recognized by the PYQ flow.
const SUBJECTS: [&str; 9] = [
    "physics",
    "chemistry",
    "mathematics",
    "biology",
    "english",
    "history",
    "geography",
    "computer",
    "economics",
];

// Compiled once at startup; the patterns are literals, so expect() can
// only fire on a typo caught by the test suite.
static TOPIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)(?:about|on|regarding|for)\s+(.+?)(?:\.|$)")
            .expect("Invalid regex: topic preposition pattern"),
        Regex::new(
            r#"(?i)(?:create|make|generate)\s+(?:a|an)?\s*(?:pdf|doc|ppt|document|report)?\s*(?:about|on)?\s*"?([^".]+)"?"#,
        )
        .expect("Invalid regex: topic command pattern"),
    ]
});

static SECTION_LIST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)sections?:?\s*(.+)").expect("Invalid regex: section list pattern")
});

/// Pull the topic phrase out of free text, e.g. the part after "about".
/// Returns an empty string when no pattern matches.
pub fn extract_topic(text: &str) -> String {
    for pattern in TOPIC_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                let topic = m.as_str().trim();
                if !topic.is_empty() {
                    return topic.to_string();
                }
            }
        }
    }
    String::new()
}

/// Title = topic split on the first period, truncated to 100 characters.
pub fn extract_title(text: &str) -> String {
    let topic = extract_topic(text);
    if topic.is_empty() {
        return String::new();
    }

    topic
        .split('.')
        .next()
        .unwrap_or("")
        .chars()
        .take(TITLE_MAX_CHARS)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Section list, attempted only when the text mentions "section" or
/// "include"; split on comma/semicolon/newline. Otherwise the fixed
/// three-element default.
pub fn extract_sections(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    if lowered.contains("section") || lowered.contains("include") {
        if let Some(caps) = SECTION_LIST_PATTERN.captures(text) {
            if let Some(m) = caps.get(1) {
                let sections: Vec<String> = m
                    .as_str()
                    .split([',', ';', '\n'])
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if !sections.is_empty() {
                    return sections;
                }
            }
        }
    }

    DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect()
}

/// Literal membership check against the fixed subject vocabulary,
/// capitalized for display. Empty string when no subject is mentioned.
pub fn extract_subject(text: &str) -> String {
    let lowered = text.to_lowercase();
    for subject in SUBJECTS {
        if lowered.contains(subject) {
            return capitalize(subject);
        }
    }
    String::new()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
