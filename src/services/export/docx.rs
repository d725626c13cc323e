//! Word (DOCX) export
//!
//! Writes a minimal WordprocessingML package with the `zip` crate. Each input
//! line becomes one paragraph and the text keeps every Unicode character.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{split_lines, ExportError};

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

// A4 in twentieths of a point, 1 inch margins
const DOCUMENT_TAIL: &str = r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#;

/// Characters XML 1.0 can carry
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Escape a run of text for element content
fn escape_text(text: &str) -> Result<String, ExportError> {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#xD;"),
            c if is_xml_char(c) => out.push(c),
            c => {
                return Err(ExportError::Encoding(format!(
                    "character U+{:04X} cannot be stored in a Word document",
                    c as u32
                )))
            }
        }
    }
    Ok(out)
}

/// Build the `<w:p>` element for one line
fn paragraph_xml(line: &str) -> Result<String, ExportError> {
    if line.is_empty() {
        return Ok("<w:p/>".to_string());
    }

    let mut runs = Vec::new();
    for (index, segment) in line.split('\t').enumerate() {
        if index > 0 {
            runs.push("<w:tab/>".to_string());
        }
        if !segment.is_empty() {
            runs.push(format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape_text(segment)?));
        }
    }

    Ok(format!("<w:p><w:r>{}</w:r></w:p>", runs.concat()))
}

/// Build `word/document.xml` for a text
pub fn document_xml(text: &str) -> Result<String, ExportError> {
    let mut xml = String::from(DOCUMENT_HEAD);
    for line in split_lines(text) {
        xml.push_str(&paragraph_xml(line)?);
    }
    xml.push_str(DOCUMENT_TAIL);
    Ok(xml)
}

/// Render text to DOCX bytes
pub fn render_docx(text: &str) -> Result<Vec<u8>, ExportError> {
    let document = document_xml(text)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", ROOT_RELS_XML),
        ("word/document.xml", document.as_str()),
    ];
    for (name, content) in parts {
        zip.start_file(name, options)
            .map_err(|e| ExportError::Archive(e.to_string()))?;
        zip.write_all(content.as_bytes())
            .map_err(|e| ExportError::Archive(e.to_string()))?;
    }

    let cursor = zip.finish().map_err(|e| ExportError::Archive(e.to_string()))?;
    Ok(cursor.into_inner())
}


/// Property-based tests for the DOCX export
#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn property_line_count_preserved(lines in prop::collection::vec("[a-zA-Z0-9 \t<>&é日→-]{0,80}", 1..40)) {
            let text = lines.join("\n");
            let xml = document_xml(&text).unwrap();
            let paragraphs = xml.matches("<w:p>").count() + xml.matches("<w:p/>").count();
            prop_assert_eq!(paragraphs, text.split('\n').count());
        }
    }
}
