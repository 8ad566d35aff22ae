//! DOCX rendering via `docx-rs`.

use std::io::Cursor;

use chrono::Utc;
use docx_rs::{Docx, Paragraph, Run};

use super::DocumentRequest;
use crate::error::AppError;

// Run sizes are half-points.
const TITLE_SIZE: usize = 40;
const HEADING_SIZE: usize = 28;
const BODY_SIZE: usize = 22;

/// Render the request as DOCX bytes: title, italic date line, then one
/// numbered bold heading and one body paragraph per section.
pub fn render(request: &DocumentRequest) -> Result<Vec<u8>, AppError> {
    let date_line = format!("Generated: {}", Utc::now().format("%Y-%m-%d"));

    let mut docx = Docx::new()
        .add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(request.title.as_str()).size(TITLE_SIZE).bold()),
        )
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(date_line).italic()));

    for (index, section) in request.sections.iter().enumerate() {
        let heading = format!("{}. {}", index + 1, section);
        docx = docx
            .add_paragraph(
                Paragraph::new().add_run(Run::new().add_text(heading).size(HEADING_SIZE).bold()),
            )
            .add_paragraph(
                Paragraph::new().add_run(Run::new().add_text(request.content.as_str()).size(BODY_SIZE)),
            );
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| AppError::Export(format!("DOCX packing failed: {}", e)))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_a_zip_package() {
        let request = DocumentRequest::new(
            "Machine Learning basics",
            "An overview of supervised learning.",
            vec!["Introduction".to_string()],
        );

        let bytes = render(&request).expect("docx rendering succeeds");
        // OOXML containers are zip archives.
        assert_eq!(&bytes[..2], b"PK");
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_render_handles_empty_content() {
        let request = DocumentRequest::new("T", "", vec!["S".to_string()]);
        assert!(render(&request).is_ok());
    }
}
