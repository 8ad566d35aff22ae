//! PPTX rendering.
//!
//! A .pptx file is an OOXML zip package. No presentation-generation crate
//! exists in this stack, so the package parts (content types, relationship
//! files, presentation, master/layout/theme, slides) are emitted as XML
//! strings and zipped with the `zip` crate.
//!
//! Deck shape: a colored title slide (title + generation date), then one
//! content slide per section with a numbered heading and the body text.

use std::io::{Cursor, Write};

use chrono::Utc;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::DocumentRequest;
use crate::error::AppError;

const ACCENT_COLOR: &str = "4E54C8";
const BODY_COLOR: &str = "333333";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#;

/// English Metric Units per inch.
const EMU_PER_INCH: f64 = 914_400.0;

fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH) as i64
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the request as PPTX bytes.
pub fn render(request: &DocumentRequest) -> Result<Vec<u8>, AppError> {
    let slide_count = 1 + request.sections.len();

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    let mut add = |writer: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, body: String| -> Result<(), AppError> {
        writer.start_file(name, options)?;
        writer.write_all(body.as_bytes())?;
        Ok(())
    };

    add(&mut writer, "[Content_Types].xml", content_types(slide_count))?;
    add(&mut writer, "_rels/.rels", package_rels())?;
    add(&mut writer, "ppt/presentation.xml", presentation(slide_count))?;
    add(
        &mut writer,
        "ppt/_rels/presentation.xml.rels",
        presentation_rels(slide_count),
    )?;
    add(&mut writer, "ppt/slideMasters/slideMaster1.xml", slide_master())?;
    add(
        &mut writer,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        slide_master_rels(),
    )?;
    add(&mut writer, "ppt/slideLayouts/slideLayout1.xml", slide_layout())?;
    add(
        &mut writer,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        slide_layout_rels(),
    )?;
    add(&mut writer, "ppt/theme/theme1.xml", theme())?;

    add(&mut writer, "ppt/slides/slide1.xml", title_slide(request))?;
    add(&mut writer, "ppt/slides/_rels/slide1.xml.rels", slide_rels())?;

    for (index, section) in request.sections.iter().enumerate() {
        let number = index + 2;
        add(
            &mut writer,
            &format!("ppt/slides/slide{}.xml", number),
            content_slide(index + 1, section, &request.content),
        )?;
        add(
            &mut writer,
            &format!("ppt/slides/_rels/slide{}.xml.rels", number),
            slide_rels(),
        )?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

fn content_types(slide_count: usize) -> String {
    let mut overrides = String::new();
    for i in 1..=slide_count {
        overrides.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            i
        ));
    }

    format!(
        r#"{}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>{}</Types>"#,
        XML_DECL, overrides
    )
}

fn package_rels() -> String {
    format!(
        r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#,
        XML_DECL
    )
}

fn presentation(slide_count: usize) -> String {
    let mut slide_ids = String::new();
    for i in 0..slide_count {
        slide_ids.push_str(&format!(
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            256 + i,
            i + 2
        ));
    }

    format!(
        r#"{}<p:presentation {}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{}</p:sldIdLst><p:sldSz cx="9144000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
        XML_DECL, NS, slide_ids
    )
}

fn presentation_rels(slide_count: usize) -> String {
    let mut rels = String::from(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
    );
    for i in 0..slide_count {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            i + 2,
            i + 1
        ));
    }

    format!(
        r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        XML_DECL, rels
    )
}

fn empty_sp_tree() -> &'static str {
    r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#
}

fn slide_master() -> String {
    format!(
        r#"{}<p:sldMaster {}><p:cSld>{}</p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#,
        XML_DECL,
        NS,
        empty_sp_tree()
    )
}

fn slide_master_rels() -> String {
    format!(
        r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/></Relationships>"#,
        XML_DECL
    )
}

fn slide_layout() -> String {
    format!(
        r#"{}<p:sldLayout {} type="blank"><p:cSld>{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        XML_DECL,
        NS,
        empty_sp_tree()
    )
}

fn slide_layout_rels() -> String {
    format!(
        r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#,
        XML_DECL
    )
}

fn slide_rels() -> String {
    format!(
        r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/></Relationships>"#,
        XML_DECL
    )
}

/// Minimal but complete theme part; PowerPoint requires the color, font,
/// and format schemes to be present even when unused.
fn theme() -> String {
    let fills = r#"<a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst>"#;
    let lines = r#"<a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst>"#;
    let effects = r#"<a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>"#;
    let bg_fills = r#"<a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst>"#;

    format!(
        r#"{}<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="StudyMate"><a:themeElements><a:clrScheme name="StudyMate"><a:dk1><a:srgbClr val="000000"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F1F1F"/></a:dk2><a:lt2><a:srgbClr val="EEEEEE"/></a:lt2><a:accent1><a:srgbClr val="{accent}"/></a:accent1><a:accent2><a:srgbClr val="8F94FB"/></a:accent2><a:accent3><a:srgbClr val="4ECDC4"/></a:accent3><a:accent4><a:srgbClr val="FF6B6B"/></a:accent4><a:accent5><a:srgbClr val="FFE66D"/></a:accent5><a:accent6><a:srgbClr val="292F36"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme><a:fontScheme name="StudyMate"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="StudyMate">{fills}{lines}{effects}{bg_fills}</a:fmtScheme></a:themeElements></a:theme>"#,
        XML_DECL,
        accent = ACCENT_COLOR,
        fills = fills,
        lines = lines,
        effects = effects,
        bg_fills = bg_fills
    )
}

/// A positioned text box shape.
#[allow(clippy::too_many_arguments)]
fn text_box(
    id: usize,
    x_in: f64,
    y_in: f64,
    w_in: f64,
    h_in: f64,
    size_hundredths: u32,
    bold: bool,
    color: &str,
    centered: bool,
    text: &str,
) -> String {
    let align = if centered { r#" algn="ctr""# } else { "" };
    let bold_attr = if bold { r#" b="1""# } else { "" };

    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="TextBox {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{w}" cy="{h}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr wrap="square"/><a:lstStyle/><a:p><a:pPr{align}/><a:r><a:rPr lang="en-US" sz="{size}"{bold}><a:solidFill><a:srgbClr val="{color}"/></a:solidFill></a:rPr><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp>"#,
        id = id,
        x = emu(x_in),
        y = emu(y_in),
        w = emu(w_in),
        h = emu(h_in),
        align = align,
        size = size_hundredths,
        bold = bold_attr,
        color = color,
        text = xml_escape(text)
    )
}

fn slide(background: Option<&str>, shapes: &str) -> String {
    let bg = match background {
        Some(color) => format!(
            r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
            color
        ),
        None => String::new(),
    };

    format!(
        r#"{}<p:sld {}><p:cSld>{}{}{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        XML_DECL,
        NS,
        bg,
        empty_sp_tree(),
        shapes
    )
}

fn title_slide(request: &DocumentRequest) -> String {
    let date_line = format!("Generated: {}", Utc::now().format("%Y-%m-%d"));

    let mut shapes = String::new();
    shapes.push_str(&text_box(2, 1.0, 2.0, 8.0, 1.5, 3600, true, "FFFFFF", true, &request.title));
    shapes.push_str(&text_box(3, 1.0, 4.0, 8.0, 0.5, 1400, false, "FFFFFF", true, &date_line));

    slide(Some(ACCENT_COLOR), &shapes)
}

fn content_slide(number: usize, section: &str, content: &str) -> String {
    let heading = format!("{}. {}", number, section);

    let mut shapes = String::new();
    shapes.push_str(&text_box(2, 0.5, 0.5, 9.0, 0.75, 2400, true, ACCENT_COLOR, false, &heading));
    shapes.push_str(&text_box(3, 0.5, 1.5, 9.0, 4.0, 1400, false, BODY_COLOR, false, content));

    slide(None, &shapes)
}
