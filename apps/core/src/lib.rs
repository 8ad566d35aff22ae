//! # StudyMate Core
//!
//! Backend agent for the StudyMate study companion: a rule-based dialogue
//! engine (intent classification, context tracking, templated responses),
//! a document-export service (PDF / Word / PowerPoint), session
//! persistence, and an optional pass-through to an external language
//! model.

pub mod agent;
pub mod database;
pub mod error;
pub mod export;
pub mod fs_manager;
pub mod llm;
pub mod models;
pub mod settings;

#[cfg(test)]
mod tests;
