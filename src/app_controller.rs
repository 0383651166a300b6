use anyhow::Result;
use log::{debug, error, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::{Config, ServiceSettings, SummaryMethod, MAX_SUMMARY_LENGTH, MIN_SUMMARY_LENGTH};
use crate::document::{self, DocumentKind, ExportArtifact, UploadedFile};
use crate::errors::{AppError, DocumentError};
use crate::file_utils::FileManager;
use crate::language_utils::{self, PIVOT_LANGUAGE};
use crate::summarization::{SummarizationService, Summarizer, SummaryBounds};
use crate::text_utils;
use crate::translation::{TranslationService, Translator};

// @module: Application controller for the translate-summarize workflow

/// Message shown when a run is requested without enough input
pub const MISSING_INPUT_MESSAGE: &str =
    "Please provide text or upload a file, and select both input and output languages to summarize.";

/// Message shown when an uploaded file holds no text
pub const EMPTY_DOCUMENT_MESSAGE: &str = "The uploaded file does not contain any text to summarize.";

/// One summarization request
#[derive(Debug, Clone, Default)]
pub struct SummarizeRequest {
    /// Pasted text
    pub text: Option<String>,
    /// Uploaded file; supersedes `text`
    pub upload: Option<UploadedFile>,
    /// Language of the input, code or name
    pub input_language: Option<String>,
    /// Language of the summary, code or name
    pub output_language: Option<String>,
    /// Summary length as a percentage of the input word count
    pub percentage: u8,
    pub method: SummaryMethod,
}

impl SummarizeRequest {
    /// Request pre-filled with the languages, length and method from `config`
    pub fn from_config(config: &Config) -> Self {
        Self {
            text: None,
            upload: None,
            input_language: config.input_language.clone(),
            output_language: config.output_language.clone(),
            percentage: config.summary_length,
            method: config.summary_method,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_upload(mut self, upload: UploadedFile) -> Self {
        self.upload = Some(upload);
        self
    }

    pub fn with_languages(mut self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.input_language = Some(input.into());
        self.output_language = Some(output.into());
        self
    }

    pub fn with_percentage(mut self, percentage: u8) -> Self {
        self.percentage = percentage;
        self
    }

    fn has_input(&self) -> bool {
        self.upload.is_some() || self.text.as_deref().is_some_and(|text| !text.trim().is_empty())
    }
}

/// Why a run did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionWarning {
    /// No text or file, or a language was not selected
    MissingInput,
    /// The uploaded file produced no text
    EmptyDocument,
}

impl PreconditionWarning {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingInput => MISSING_INPUT_MESSAGE,
            Self::EmptyDocument => EMPTY_DOCUMENT_MESSAGE,
        }
    }
}

impl fmt::Display for PreconditionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Workflow stage that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingest,
    TranslateInput,
    Summarize,
    TranslateOutput,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ingest => "reading the uploaded file",
            Self::TranslateInput => "translating the input",
            Self::Summarize => "summarizing",
            Self::TranslateOutput => "translating the summary",
        };
        f.write_str(name)
    }
}

/// A stage failure and its cause
#[derive(Debug)]
pub struct StageFailure {
    pub stage: Stage,
    pub error: AppError,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed while {}: {}", self.stage, self.error)
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    /// Summary in the output language
    pub summary: String,
    /// Bounds passed to the summarizer
    pub bounds: SummaryBounds,
    /// Words in the pivot-language text
    pub word_count: usize,
    /// Resolved input language code
    pub input_language: &'static str,
    /// Resolved output language code
    pub output_language: &'static str,
    /// Whether the input went through the translator
    pub input_translated: bool,
    /// Whether the summary went through the translator
    pub output_translated: bool,
    pub method: SummaryMethod,
}

impl SummaryReport {
    /// `summary.txt` and `summary.docx` for this summary
    pub fn artifacts(&self) -> Result<Vec<ExportArtifact>, DocumentError> {
        Ok(vec![ExportArtifact::text(&self.summary), ExportArtifact::docx(&self.summary)?])
    }
}

/// Outcome of one run
#[derive(Debug)]
pub enum RunOutcome {
    Warning(PreconditionWarning),
    Completed(SummaryReport),
    Failed(StageFailure),
}

impl RunOutcome {
    fn failed(stage: Stage, error: impl Into<AppError>) -> Self {
        let failure = StageFailure { stage, error: error.into() };
        error!("{}", failure);
        Self::Failed(failure)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Which exports to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    Txt,
    Docx,
    #[default]
    Both,
    None,
}

impl ExportFormat {
    pub fn includes(&self, kind: DocumentKind) -> bool {
        match self {
            Self::Both => true,
            Self::Txt => kind == DocumentKind::Text,
            Self::Docx => kind == DocumentKind::Docx,
            Self::None => false,
        }
    }
}

/// Main application controller for translate-then-summarize runs
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Translation adapter
    translator: Arc<dyn Translator>,

    // @field: Summarization adapter
    summarizer: Arc<dyn Summarizer>,
}

impl Controller {
    /// Create a controller around the given adapters
    pub fn new(config: Config, translator: Arc<dyn Translator>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            config,
            translator,
            summarizer,
        }
    }

    // @method: Create a controller with HTTP-backed adapters built from the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let translator = Arc::new(TranslationService::new(config.translation.clone())?);
        let summarizer = Arc::new(SummarizationService::new(config.summarization.clone())?);

        info!(
            "Translation: {} | Summarization: {} ({})",
            config.translation.provider.display_name(),
            config.summarization.provider.display_name(),
            config.summarization.get_model()
        );
        debug!(
            "Endpoints: translation {} | summarization {}",
            config.translation.get_endpoint(),
            config.summarization.get_endpoint()
        );

        Ok(Self::new(config, translator, summarizer))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Request pre-filled from this controller's configuration
    pub fn request(&self) -> SummarizeRequest {
        SummarizeRequest::from_config(&self.config)
    }

    /// Run translate, summarize and translate back for one request
    pub async fn run(&self, request: SummarizeRequest) -> RunOutcome {
        let start_time = Instant::now();

        // Selections outside the language table count as not selected
        let input_language = request
            .input_language
            .as_deref()
            .and_then(|language| language_utils::resolve_language(language).ok());
        let output_language = request
            .output_language
            .as_deref()
            .and_then(|language| language_utils::resolve_language(language).ok());

        let (input_language, output_language) = match (request.has_input(), input_language, output_language) {
            (true, Some(input), Some(output)) => (input, output),
            _ => {
                warn!("{}", MISSING_INPUT_MESSAGE);
                return RunOutcome::Warning(PreconditionWarning::MissingInput);
            }
        };

        let text = match &request.upload {
            Some(upload) => match document::extract_text(upload) {
                Ok(text) => text,
                Err(e) => return RunOutcome::failed(Stage::Ingest, e),
            },
            None => request.text.clone().unwrap_or_default(),
        };

        if text.trim().is_empty() {
            warn!("{}", EMPTY_DOCUMENT_MESSAGE);
            return RunOutcome::Warning(PreconditionWarning::EmptyDocument);
        }

        if request.method == SummaryMethod::Extractive {
            warn!("Extractive summarization is not available; using abstractive summarization");
        }

        let percentage = request.percentage.clamp(MIN_SUMMARY_LENGTH, MAX_SUMMARY_LENGTH);
        if percentage != request.percentage {
            warn!("Summary length {}% is out of range, using {}%", request.percentage, percentage);
        }

        info!(
            "Summarizing {} words ({} -> {}) at {}%",
            text_utils::word_count(&text),
            input_language,
            output_language,
            percentage
        );

        let input_translated = !language_utils::is_pivot_language(input_language);
        let pivot_text = if input_translated {
            info!("Translating input from {} to {}", input_language, PIVOT_LANGUAGE);
            match self.translator.translate(&text, Some(input_language), PIVOT_LANGUAGE).await {
                Ok(translated) => translated,
                Err(e) => return RunOutcome::failed(Stage::TranslateInput, e),
            }
        } else {
            text
        };

        let bounds = SummaryBounds::for_text(&pivot_text, percentage);
        let word_count = text_utils::word_count(&pivot_text);
        info!(
            "Summary bounds: {}-{} words from {} words",
            bounds.min_length, bounds.max_length, word_count
        );

        let summary = match self.summarizer.summarize(&pivot_text, bounds).await {
            Ok(summary) => summary,
            Err(e) => return RunOutcome::failed(Stage::Summarize, e),
        };

        let output_translated = !language_utils::is_pivot_language(output_language);
        let summary = if output_translated {
            info!("Translating summary from {} to {}", PIVOT_LANGUAGE, output_language);
            match self.translator.translate(&summary, Some(PIVOT_LANGUAGE), output_language).await {
                Ok(translated) => translated,
                Err(e) => return RunOutcome::failed(Stage::TranslateOutput, e),
            }
        } else {
            summary
        };

        info!(
            "Summary ready: {} words in {:.1}s",
            text_utils::word_count(&summary),
            start_time.elapsed().as_secs_f64()
        );

        RunOutcome::Completed(SummaryReport {
            summary,
            bounds,
            word_count,
            input_language,
            output_language,
            input_translated,
            output_translated,
            method: request.method,
        })
    }

    /// Write the selected exports of `report` into `output_dir`
    ///
    /// Existing files are kept unless `force_overwrite` is set.
    pub fn save_artifacts<P: AsRef<Path>>(
        report: &SummaryReport,
        output_dir: P,
        format: ExportFormat,
        force_overwrite: bool,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for artifact in report.artifacts()? {
            if !format.includes(artifact.kind()) {
                continue;
            }
            if let Some(path) = FileManager::save_artifact(output_dir.as_ref(), &artifact, force_overwrite)? {
                written.push(path);
            }
        }

        Ok(written)
    }
}
