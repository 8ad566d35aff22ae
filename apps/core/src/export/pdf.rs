//! PDF rendering without an external generator.
//!
//! Assembles a minimal PDF 1.4 document by hand: a catalog, a page tree,
//! two standard Helvetica fonts, and one content stream per page. Layout
//! follows the export template: bold title, generation date, numbered bold
//! section headings, wrapped body text, page break when the cursor reaches
//! the bottom margin.

use chrono::Utc;

use super::DocumentRequest;

// A4 in points.
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 56.0;
const BOTTOM_LIMIT: f32 = 64.0;

const TITLE_SIZE: f32 = 20.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;
const BODY_LEADING: f32 = 15.0;

/// Rough character budget per body line for 11pt Helvetica across the
/// printable width.
const WRAP_COLUMNS: usize = 92;

/// Render the request as PDF bytes. Total: layout cannot fail.
pub fn render(request: &DocumentRequest) -> Vec<u8> {
    let pages = layout_pages(request);
    assemble(&pages)
}

/// One text drawing operation.
struct TextOp {
    x: f32,
    y: f32,
    size: f32,
    bold: bool,
    text: String,
}

/// Lay the document out into pages of text operations.
fn layout_pages(request: &DocumentRequest) -> Vec<Vec<TextOp>> {
    let mut pages: Vec<Vec<TextOp>> = vec![Vec::new()];
    let mut y = PAGE_HEIGHT - MARGIN;

    let mut put = |pages: &mut Vec<Vec<TextOp>>, y: &mut f32, size: f32, bold: bool, text: &str, advance: f32| {
        if *y < BOTTOM_LIMIT {
            pages.push(Vec::new());
            *y = PAGE_HEIGHT - MARGIN;
        }
        if let Some(page) = pages.last_mut() {
            page.push(TextOp {
                x: MARGIN,
                y: *y,
                size,
                bold,
                text: text.to_string(),
            });
        }
        *y -= advance;
    };

    put(&mut pages, &mut y, TITLE_SIZE, true, &request.title, 18.0);
    let date_line = format!("Generated: {}", Utc::now().format("%Y-%m-%d"));
    put(&mut pages, &mut y, 10.0, false, &date_line, 24.0);

    let body_lines = wrap(&request.content, WRAP_COLUMNS);

    for (index, section) in request.sections.iter().enumerate() {
        let heading = format!("{}. {}", index + 1, section);
        put(&mut pages, &mut y, HEADING_SIZE, true, &heading, 18.0);

        for line in &body_lines {
            put(&mut pages, &mut y, BODY_SIZE, false, line, BODY_LEADING);
        }
        y -= 8.0;
    }

    pages
}

/// Greedy word wrap on a character budget.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Escape a string for a PDF literal string.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '(' => out.push_str(r"\("),
            ')' => out.push_str(r"\)"),
            c if c.is_ascii() && !c.is_control() => out.push(c),
            // Non-WinAnsi input degrades to a placeholder rather than
            // corrupting the stream.
            _ => out.push('?'),
        }
    }
    out
}

fn content_stream(ops: &[TextOp]) -> String {
    let mut stream = String::new();
    for op in ops {
        let font = if op.bold { "F2" } else { "F1" };
        stream.push_str(&format!(
            "BT /{} {} Tf {:.1} {:.1} Td ({}) Tj ET\n",
            font,
            op.size,
            op.x,
            op.y,
            escape(&op.text)
        ));
    }
    stream
}

/// Serialize the object graph with a correct xref table.
fn assemble(pages: &[Vec<TextOp>]) -> Vec<u8> {
    // Object numbering: 1 catalog, 2 pages, 3 F1, 4 F2, then for each
    // page i: 5+2i page object, 6+2i content stream.
    let page_count = pages.len();
    let mut objects: Vec<String> = Vec::with_capacity(4 + page_count * 2);

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 5 + 2 * i))
        .collect();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        page_count
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string());

    for (i, ops) in pages.iter().enumerate() {
        let content_ref = 6 + 2 * i;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH, PAGE_HEIGHT, content_ref
        ));

        let stream = content_stream(ops);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            stream.len(),
            stream
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());

    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DocumentRequest {
        DocumentRequest::new(
            "Machine Learning basics",
            "An overview of supervised and unsupervised learning.",
            vec!["Introduction".to_string(), "Conclusion".to_string()],
        )
    }

    #[test]
    fn test_render_produces_valid_header_and_trailer() {
        let bytes = render(&request());
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_render_embeds_title_and_headings() {
        let bytes = render(&request());
        let text = String::from_utf8(bytes).expect("pdf output is ascii");
        assert!(text.contains("(Machine Learning basics)"));
        assert!(text.contains("(1. Introduction)"));
        assert!(text.contains("(2. Conclusion)"));
        assert!(text.contains("Helvetica-Bold"));
    }

    #[test]
    fn test_parentheses_are_escaped() {
        let req = DocumentRequest::new("F(x) = y", "body", vec!["S1".to_string()]);
        let text = String::from_utf8(render(&req)).expect("ascii");
        assert!(text.contains(r"(F\(x\) = y)"));
    }

    #[test]
    fn test_long_content_paginates() {
        let long = "word ".repeat(4000);
        let req = DocumentRequest::new("Long", long.as_str(), vec!["Only".to_string()]);
        let text = String::from_utf8(render(&req)).expect("ascii");
        assert!(text.matches("/Type /Page ").count() >= 2);
    }

    #[test]
    fn test_wrap_respects_budget() {
        let lines = wrap(&"alpha ".repeat(100), 20);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        assert!(lines.len() > 1);
    }
}
