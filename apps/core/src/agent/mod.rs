//! # Agent Module
//!
//! Rule-based dialogue engine for StudyMate.
//! Runs a single-pass, synchronous pipeline on every user turn:
//! classify intent, merge conversation context, extract entities,
//! compose the reply (and an optional download action).
//!
//! ## Components
//! - `intent`: Intent classification over an ordered keyword rule list
//! - `context`: Per-conversation context record threaded between turns
//! - `extract`: Regex-based title/section/subject extraction
//! - `composer`: Templated response composition + action descriptors
//! - `responder`: Main orchestrator

pub mod composer;
pub mod context;
pub mod extract;
pub mod intent;
pub mod responder;

pub use composer::{ActionDescriptor, ActionKind, AgentReply};
pub use context::{ConversationContext, DocumentDetails};
pub use intent::{DocumentKind, Intent, IntentClassifier};
pub use responder::StudyAgent;
