/*!
 * Uploaded documents and summary exports.
 *
 * Two formats are understood: UTF-8 plain text and OOXML word-processing
 * documents (`.docx`). Reading a `.docx` keeps only the paragraphs that sit
 * directly in the document body, in order, one per line. Tables, text boxes,
 * drawings and other embedded objects are skipped.
 */

use bytes::Bytes;
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::escape::escape;
use quick_xml::reader::Reader;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::errors::DocumentError;

/// MIME type of plain-text uploads and exports
pub const TEXT_MIME: &str = "text/plain";

/// MIME type of word-processing uploads and exports
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// File name of the plain-text export
pub const SUMMARY_TXT: &str = "summary.txt";

/// File name of the word-processing export
pub const SUMMARY_DOCX: &str = "summary.docx";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const DOCUMENT_PART: &str = "word/document.xml";

/// Elements whose text never belongs to the paragraph that contains them
const SKIPPED_ELEMENTS: &[&[u8]] = &[
    b"drawing",
    b"pict",
    b"object",
    b"AlternateContent",
    b"txbxContent",
    b"instrText",
    b"delText",
];

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Plain UTF-8 text
    Text,
    /// OOXML word-processing document
    Docx,
}

impl DocumentKind {
    /// Kind for a declared MIME type
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        match mime_type {
            TEXT_MIME => Some(Self::Text),
            DOCX_MIME => Some(Self::Docx),
            _ => None,
        }
    }

    /// Kind for a file extension, case-insensitive
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Text),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Kind for a path, from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Text => TEXT_MIME,
            Self::Docx => DOCX_MIME,
        }
    }
}

/// A file handed to the workflow
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Original file name
    pub file_name: String,
    /// Declared MIME type
    pub mime_type: String,
    /// Raw content
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Load a file from disk, inferring its MIME type from the extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let kind = DocumentKind::from_path(path)
            .ok_or_else(|| DocumentError::UnsupportedType(path.display().to_string()))?;

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self::new(file_name, kind.mime_type(), bytes))
    }
}

/// Extract the text of an uploaded file
pub fn extract_text(file: &UploadedFile) -> Result<String, DocumentError> {
    let kind = DocumentKind::from_mime(&file.mime_type)
        .ok_or_else(|| DocumentError::UnsupportedType(file.mime_type.clone()))?;

    let text = match kind {
        DocumentKind::Text => decode_text(&file.bytes)?,
        DocumentKind::Docx => read_docx(&file.bytes)?.join("\n"),
    };

    debug!(
        "Extracted {} characters from '{}' ({})",
        text.chars().count(),
        file.file_name,
        file.mime_type
    );
    Ok(text)
}

/// Strict UTF-8 decoding with the byte order mark removed
pub fn decode_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Body-level paragraphs of a `.docx` package, in document order
pub fn read_docx(bytes: &[u8]) -> Result<Vec<String>, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;
    parse_document_xml(&xml)
}

/// Paragraph texts from the main document part
pub fn parse_document_xml(xml: &str) -> Result<Vec<String>, DocumentError> {
    let mut reader = Reader::from_str(xml);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    // Depth of the body paragraph being read, and the text gathered so far
    let mut current: Option<(usize, String)> = None;
    // Depth of a skipped element inside that paragraph
    let mut skip_depth: Option<usize> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                let name = element.local_name().as_ref().to_vec();
                path.push(name);
                let depth = path.len();
                let name = &path[depth - 1];

                if current.is_none() && name == b"p" && parent_is(&path, b"body") {
                    current = Some((depth, String::new()));
                } else if current.is_some() && skip_depth.is_none() && SKIPPED_ELEMENTS.contains(&name.as_slice()) {
                    skip_depth = Some(depth);
                }
            }
            Event::Empty(element) => {
                let name = element.local_name();
                let name = name.as_ref();

                if current.is_none() {
                    if name == b"p" && path.last().map(Vec::as_slice) == Some(b"body".as_slice()) {
                        paragraphs.push(String::new());
                    }
                    continue;
                }

                // Tab stops in paragraph properties share the element name
                let in_run = path.last().map(Vec::as_slice) == Some(b"r".as_slice());
                if let (Some((_, text)), None, true) = (current.as_mut(), skip_depth, in_run) {
                    match name {
                        b"tab" | b"ptab" => text.push('\t'),
                        b"br" if is_line_break(&element) => text.push('\n'),
                        b"cr" => text.push('\n'),
                        b"noBreakHyphen" => text.push('-'),
                        _ => {}
                    }
                }
            }
            Event::Text(content) => {
                let in_text = path.last().map(Vec::as_slice) == Some(b"t".as_slice());
                if let (Some((_, text)), None, true) = (current.as_mut(), skip_depth, in_text) {
                    text.push_str(&content.unescape()?);
                }
            }
            Event::CData(content) => {
                let in_text = path.last().map(Vec::as_slice) == Some(b"t".as_slice());
                if let (Some((_, text)), None, true) = (current.as_mut(), skip_depth, in_text) {
                    text.push_str(&String::from_utf8_lossy(&content));
                }
            }
            Event::End(_) => {
                let depth = path.len();
                if skip_depth == Some(depth) {
                    skip_depth = None;
                }
                if current.as_ref().map(|(d, _)| *d) == Some(depth) {
                    if let Some((_, text)) = current.take() {
                        paragraphs.push(text);
                    }
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

// Page and column breaks carry a `w:type` and add no text
fn is_line_break(element: &BytesStart) -> bool {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"type")
        .is_none_or(|attr| attr.value.as_ref() == b"textWrapping")
}

fn parent_is(path: &[Vec<u8>], name: &[u8]) -> bool {
    path.len() >= 2 && path[path.len() - 2] == name
}

const CONTENT_TYPES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#
);

const PACKAGE_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#
);

const DOCUMENT_XML_HEAD: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:body>"#
);

const DOCUMENT_XML_TAIL: &str = "</w:body></w:document>";

/// Main document part with one paragraph per entry
pub fn document_xml(paragraphs: &[&str]) -> String {
    let mut xml = String::from(DOCUMENT_XML_HEAD);

    for paragraph in paragraphs {
        xml.push_str("<w:p>");
        if !paragraph.is_empty() {
            xml.push_str("<w:r>");
            for (index, line) in paragraph.split('\n').enumerate() {
                if index > 0 {
                    xml.push_str("<w:br/>");
                }
                for (segment_index, segment) in line.split('\t').enumerate() {
                    if segment_index > 0 {
                        xml.push_str("<w:tab/>");
                    }
                    if !segment.is_empty() {
                        xml.push_str(r#"<w:t xml:space="preserve">"#);
                        xml.push_str(&escape(segment));
                        xml.push_str("</w:t>");
                    }
                }
            }
            xml.push_str("</w:r>");
        }
        xml.push_str("</w:p>");
    }

    xml.push_str(DOCUMENT_XML_TAIL);
    xml
}

/// Build a minimal `.docx` package
pub fn build_docx(paragraphs: &[&str]) -> Result<Vec<u8>, DocumentError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
        (DOCUMENT_PART, document_xml(paragraphs)),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

/// A downloadable rendition of the summary
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Bytes,
}

impl ExportArtifact {
    /// `summary.txt` holding the summary verbatim
    pub fn text(summary: &str) -> Self {
        Self {
            file_name: SUMMARY_TXT,
            mime_type: TEXT_MIME,
            bytes: Bytes::copy_from_slice(summary.as_bytes()),
        }
    }

    /// `summary.docx` holding the summary as a single paragraph
    pub fn docx(summary: &str) -> Result<Self, DocumentError> {
        Ok(Self {
            file_name: SUMMARY_DOCX,
            mime_type: DOCX_MIME,
            bytes: Bytes::from(build_docx(&[summary])?),
        })
    }

    pub fn kind(&self) -> DocumentKind {
        if self.mime_type == DOCX_MIME {
            DocumentKind::Docx
        } else {
            DocumentKind::Text
        }
    }
}
