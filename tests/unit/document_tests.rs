/*!
 * Tests for upload text extraction and summary exports
 */

use summarize_pro::document::{
    build_docx, extract_text, read_docx, DocumentKind, ExportArtifact, UploadedFile, DOCX_MIME, TEXT_MIME,
};
use summarize_pro::errors::DocumentError;

use crate::common::{create_temp_dir, create_test_file, docx_with_body, docx_with_paragraphs};

#[test]
fn test_extract_text_withTwoParagraphDocx_shouldJoinWithNewline() {
    let bytes = docx_with_paragraphs(&["Para one.", "Para two."]).unwrap();
    let file = UploadedFile::new("two.docx", DOCX_MIME, bytes);

    assert_eq!(extract_text(&file).unwrap(), "Para one.\nPara two.");
}

#[test]
fn test_extract_text_withFormattedRuns_shouldKeepBodyTextOnly() {
    let body = concat!(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Title</w:t></w:r></w:p>"#,
        r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>In a table</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        r#"<w:p><w:r><w:t xml:space="preserve">Body </w:t></w:r><w:r><w:rPr><w:i/></w:rPr><w:t>text</w:t></w:r>"#,
        r#"<w:r><w:drawing><wp:inline><w:txbxContent><w:p><w:r><w:t>Floating</w:t></w:r></w:p></w:txbxContent></wp:inline></w:drawing></w:r></w:p>"#,
    );
    let file = UploadedFile::new("formatted.docx", DOCX_MIME, docx_with_body(body).unwrap());

    assert_eq!(extract_text(&file).unwrap(), "Title\nBody text");
}

#[test]
fn test_extract_text_withPageBreakAndNoBreakHyphen_shouldMatchVisibleText() {
    let body = concat!(
        r#"<w:p><w:r><w:t>Chapter end</w:t><w:br w:type="page"/><w:t>Next</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>e</w:t><w:noBreakHyphen/><w:t>mail and</w:t><w:br/><w:t>more</w:t></w:r></w:p>"#,
    );
    let file = UploadedFile::new("breaks.docx", DOCX_MIME, docx_with_body(body).unwrap());

    assert_eq!(extract_text(&file).unwrap(), "Chapter endNext
e-mail and
more");
}

#[test]
fn test_read_docx_withEmptyBody_shouldReturnNoParagraphs() {
    let bytes = build_docx(&[]).unwrap();
    assert!(read_docx(&bytes).unwrap().is_empty());
}

#[test]
fn test_extract_text_withTruncatedDocx_shouldFailWithArchiveError() {
    let mut bytes = docx_with_paragraphs(&["x"]).unwrap();
    bytes.truncate(bytes.len() / 2);
    let file = UploadedFile::new("half.docx", DOCX_MIME, bytes);

    assert!(matches!(extract_text(&file), Err(DocumentError::Archive(_))));
}

#[test]
fn test_uploaded_file_fromPath_shouldInferMimeFromExtension() {
    let temp_dir = create_temp_dir().unwrap();
    let txt = create_test_file(temp_dir.path(), "notes.TXT", b"Hello world").unwrap();
    let docx = create_test_file(temp_dir.path(), "doc.docx", &docx_with_paragraphs(&["Hi"]).unwrap()).unwrap();
    let pdf = create_test_file(temp_dir.path(), "paper.pdf", b"%PDF").unwrap();

    let txt_file = UploadedFile::from_path(&txt).unwrap();
    assert_eq!(txt_file.mime_type, TEXT_MIME);
    assert_eq!(txt_file.file_name, "notes.TXT");
    assert_eq!(extract_text(&txt_file).unwrap(), "Hello world");

    let docx_file = UploadedFile::from_path(&docx).unwrap();
    assert_eq!(docx_file.mime_type, DOCX_MIME);
    assert_eq!(extract_text(&docx_file).unwrap(), "Hi");

    assert!(matches!(UploadedFile::from_path(&pdf), Err(DocumentError::UnsupportedType(_))));
}

#[test]
fn test_document_kind_withMimeAndExtension_shouldAgree() {
    assert_eq!(DocumentKind::from_mime(TEXT_MIME), Some(DocumentKind::Text));
    assert_eq!(DocumentKind::from_mime(DOCX_MIME), Some(DocumentKind::Docx));
    assert_eq!(DocumentKind::from_mime("application/msword"), None);
    assert_eq!(DocumentKind::from_extension("DOCX"), Some(DocumentKind::Docx));
    assert_eq!(DocumentKind::Text.mime_type(), TEXT_MIME);
}

#[test]
fn test_docx_export_withSummary_shouldHoldOneParagraph() {
    let summary = "The report finds \"steady\" growth & lower costs.";
    let artifact = ExportArtifact::docx(summary).unwrap();

    assert_eq!(artifact.file_name, "summary.docx");
    assert_eq!(artifact.mime_type, DOCX_MIME);
    assert_eq!(read_docx(&artifact.bytes).unwrap(), vec![summary.to_string()]);
}
