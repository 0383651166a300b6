/*!
 * Common test utilities for the summarize-pro test suite
 */

use anyhow::Result;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use summarize_pro::app_config::Config;

// Re-export the mock services module
pub mod mock_services;

/// Route `log` output through the test harness
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// `n` copies of "word" separated by spaces
pub fn repeated_words(word: &str, n: usize) -> String {
    vec![word; n].join(" ")
}

/// Config with both languages selected and the default length
pub fn test_config(input_language: &str, output_language: &str) -> Config {
    Config {
        input_language: Some(input_language.to_string()),
        output_language: Some(output_language.to_string()),
        ..Config::default()
    }
}

/// Wraps body XML in a `w:document`
pub fn document_xml(body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
            r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing">"#,
            r#"<w:body>{}<w:sectPr/></w:body></w:document>"#
        ),
        body
    )
}

/// Builds a `.docx` package around raw body XML, the way a word processor lays it out
pub fn docx_with_body(body: &str) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default();
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#,
    )?;
    zip.start_file("word/styles.xml", options)?;
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><w:styles/>"#)?;
    zip.start_file("word/document.xml", options)?;
    zip.write_all(document_xml(body).as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

/// Builds a `.docx` with one simple paragraph per entry
pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Result<Vec<u8>> {
    let body: String = paragraphs
        .iter()
        .map(|text| format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, text))
        .collect();
    docx_with_body(&body)
}
