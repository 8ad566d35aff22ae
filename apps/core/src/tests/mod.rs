//! Test Module
//!
//! Integration-level test suite for the StudyMate backend.
//!
//! ## Test Categories
//! - `agent_tests`: Intent classification, context threading, entity
//!   extraction, response composition
//! - `export_tests`: PDF / DOCX / PPTX rendering and file output
//! - `database_tests`: CRUD operations for sessions and messages

pub mod agent_tests;
pub mod database_tests;
