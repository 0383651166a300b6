/*!
 * Tests for writing summary exports to disk
 */

use std::fs;

use summarize_pro::app_config::SummaryMethod;
use summarize_pro::app_controller::{Controller, ExportFormat, SummaryReport};
use summarize_pro::document::{read_docx, SUMMARY_DOCX, SUMMARY_TXT};
use summarize_pro::summarization::SummaryBounds;

use crate::common::create_temp_dir;

fn report(summary: &str) -> SummaryReport {
    SummaryReport {
        summary: summary.to_string(),
        bounds: SummaryBounds { max_length: 50, min_length: 25 },
        word_count: 100,
        input_language: "en",
        output_language: "en",
        input_translated: false,
        output_translated: false,
        method: SummaryMethod::Abstractive,
    }
}

#[test]
fn test_save_artifacts_withBothFormats_shouldWriteTxtAndDocx() {
    let temp_dir = create_temp_dir().unwrap();
    let output_dir = temp_dir.path().join("out");

    let written =
        Controller::save_artifacts(&report("A short summary."), &output_dir, ExportFormat::Both, false).unwrap();

    assert_eq!(written, vec![output_dir.join(SUMMARY_TXT), output_dir.join(SUMMARY_DOCX)]);
    assert_eq!(fs::read_to_string(output_dir.join(SUMMARY_TXT)).unwrap(), "A short summary.");
    let docx = fs::read(output_dir.join(SUMMARY_DOCX)).unwrap();
    assert_eq!(read_docx(&docx).unwrap(), vec!["A short summary."]);
}

#[test]
fn test_save_artifacts_withSingleFormat_shouldWriteOnlyThatFile() {
    let temp_dir = create_temp_dir().unwrap();

    let written = Controller::save_artifacts(&report("Text only."), temp_dir.path(), ExportFormat::Txt, false).unwrap();
    assert_eq!(written, vec![temp_dir.path().join(SUMMARY_TXT)]);
    assert!(!temp_dir.path().join(SUMMARY_DOCX).exists());

    let none = Controller::save_artifacts(&report("Nothing."), temp_dir.path(), ExportFormat::None, true).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_save_artifacts_withExistingFile_shouldRespectForceOverwrite() {
    let temp_dir = create_temp_dir().unwrap();
    let txt_path = temp_dir.path().join(SUMMARY_TXT);
    fs::write(&txt_path, "previous").unwrap();

    let kept = Controller::save_artifacts(&report("new"), temp_dir.path(), ExportFormat::Txt, false).unwrap();
    assert!(kept.is_empty());
    assert_eq!(fs::read_to_string(&txt_path).unwrap(), "previous");

    let replaced = Controller::save_artifacts(&report("new"), temp_dir.path(), ExportFormat::Txt, true).unwrap();
    assert_eq!(replaced, vec![txt_path.clone()]);
    assert_eq!(fs::read_to_string(&txt_path).unwrap(), "new");
}
