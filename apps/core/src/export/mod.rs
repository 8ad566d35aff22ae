//! # Document Export Module
//!
//! Turns an action payload (title, content, sections) into a downloadable
//! file in the requested format.
//!
//! ## Components
//! - `pdf`: multi-page PDF, hand-assembled objects
//! - `word`: DOCX via `docx-rs`
//! - `slides`: PPTX assembled as an OOXML zip package

pub mod pdf;
pub mod slides;
pub mod word;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::agent::extract::DEFAULT_SECTIONS;
use crate::agent::{DocumentDetails, DocumentKind};
use crate::error::AppError;

/// Normalized input for the renderers. An empty section list falls back
/// to the default three headings so every format renders at least one body.
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    pub title: String,
    pub content: String,
    pub sections: Vec<String>,
}

impl DocumentRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>, sections: Vec<String>) -> Self {
        let sections = if sections.is_empty() {
            DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect()
        } else {
            sections
        };
        Self {
            title: title.into(),
            content: content.into(),
            sections,
        }
    }
}

impl From<&DocumentDetails> for DocumentRequest {
    fn from(details: &DocumentDetails) -> Self {
        Self::new(
            details.title.clone(),
            details.content.clone(),
            details.sections.clone(),
        )
    }
}

/// Render the document in the requested format.
pub fn export_document(kind: DocumentKind, request: &DocumentRequest) -> Result<Vec<u8>, AppError> {
    match kind {
        DocumentKind::Pdf => Ok(pdf::render(request)),
        DocumentKind::Word => word::render(request),
        DocumentKind::Ppt => slides::render(request),
    }
}

/// File name for the generated document: sanitized title + extension.
pub fn file_name(kind: DocumentKind, title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim();
    let stem = if stem
        .trim_matches(|c: char| c == '_' || c.is_whitespace())
        .is_empty()
    {
        "document"
    } else {
        stem
    };
    format!("{}.{}", stem, kind.extension())
}

/// Render and save the document under `dir`, returning the written path.
pub fn write_document(
    dir: &Path,
    kind: DocumentKind,
    request: &DocumentRequest,
) -> Result<PathBuf, AppError> {
    let bytes = export_document(kind, request)?;
    fs::create_dir_all(dir)?;

    let path = dir.join(file_name(kind, &request.title));
    fs::write(&path, bytes)?;
    info!(path = %path.display(), "document exported");
    Ok(path)
}
