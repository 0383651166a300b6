// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use summarize_pro::app_config::{self, Config, ProviderConfig, ProviderType, SummaryMethod};
use summarize_pro::app_controller::{Controller, ExportFormat, RunOutcome};
use summarize_pro::document::UploadedFile;
use summarize_pro::language_utils::SUPPORTED_LANGUAGES;

/// CLI Wrapper for ProviderType to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProvider {
    Google,
    Ollama,
    OpenAI,
    Anthropic,
    LMStudio,
}

impl From<CliProvider> for ProviderType {
    fn from(cli_provider: CliProvider) -> Self {
        match cli_provider {
            CliProvider::Google => ProviderType::Google,
            CliProvider::Ollama => ProviderType::Ollama,
            CliProvider::OpenAI => ProviderType::OpenAI,
            CliProvider::Anthropic => ProviderType::Anthropic,
            CliProvider::LMStudio => ProviderType::LMStudio,
        }
    }
}

/// CLI Wrapper for SummaryMethod to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSummaryMethod {
    Extractive,
    Abstractive,
}

impl From<CliSummaryMethod> for SummaryMethod {
    fn from(cli_method: CliSummaryMethod) -> Self {
        match cli_method {
            CliSummaryMethod::Extractive => SummaryMethod::Extractive,
            CliSummaryMethod::Abstractive => SummaryMethod::Abstractive,
        }
    }
}

/// CLI Wrapper for ExportFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliExportFormat {
    Txt,
    Docx,
    Both,
    None,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(cli_format: CliExportFormat) -> Self {
        match cli_format {
            CliExportFormat::Txt => ExportFormat::Txt,
            CliExportFormat::Docx => ExportFormat::Docx,
            CliExportFormat::Both => ExportFormat::Both,
            CliExportFormat::None => ExportFormat::None,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate and summarize text or a document (default command)
    Summarize(SummarizeArgs),

    /// List the languages accepted for input and output
    Languages,

    /// Generate shell completions for summarize-pro
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct SummarizeArgs {
    /// Text file (.txt) or Word document (.docx) to summarize
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Text to summarize; ignored when INPUT_FILE is given
    #[arg(long)]
    text: Option<String>,

    /// Language of the input (code or English name, e.g. 'fr', 'french')
    #[arg(short, long)]
    input_language: Option<String>,

    /// Language of the summary (code or English name)
    #[arg(short, long)]
    output_language: Option<String>,

    /// Summary length as a percentage of the input word count
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(10..=100))]
    length: Option<u8>,

    /// Summarization method
    #[arg(short, long, value_enum)]
    method: Option<CliSummaryMethod>,

    /// Directory receiving summary.txt / summary.docx
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Which summary files to write
    #[arg(long, value_enum, default_value = "both")]
    format: CliExportFormat,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Translation provider to use
    #[arg(long, value_enum)]
    translation_provider: Option<CliProvider>,

    /// Model name to use for translation
    #[arg(long)]
    translation_model: Option<String>,

    /// Summarization provider to use
    #[arg(long, value_enum)]
    summarization_provider: Option<CliProvider>,

    /// Model name to use for summarization
    #[arg(long)]
    summarization_model: Option<String>,

    /// API key for OpenAI providers
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// API key for Anthropic providers
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    anthropic_api_key: Option<String>,
}

/// Summarize Pro - translate, summarize, translate back
///
/// Summarizes text in any supported language: the input is translated to
/// English, summarized by a language model, and the summary translated into
/// the requested output language.
#[derive(Parser, Debug)]
#[command(name = "summarize-pro")]
#[command(version)]
#[command(about = "Multilingual abstractive summarization")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "Summarize Pro translates its input to English, summarizes it with a language model and translates the summary into the output language.

EXAMPLES:
    summarize-pro -i fr -o en article.docx          # French document, English summary
    summarize-pro -i en -o de --text \"...\"          # Pasted text, German summary
    summarize-pro -i en -o en -l 30 notes.txt        # Summary at 30% of the input length
    summarize-pro --format txt -f report.txt -i en -o es
    summarize-pro languages                          # List supported languages
    summarize-pro completions bash > summarize-pro.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    google    - Google Translate web endpoint (translation only, default translator)
    ollama    - Local Ollama server (default summarizer: llama3.2:3b)
    openai    - OpenAI API (requires API key)
    anthropic - Anthropic Claude API (requires API key)
    lmstudio  - LM Studio local server (OpenAI-compatible on http://localhost:1234/v1)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    summarize: SummarizeArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger; later changes go through `log::set_max_level`
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger::new(LevelFilter::Trace)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                colour,
                now,
                tag,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "summarize-pro", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Languages) => {
            print_languages();
            Ok(())
        }
        Some(Commands::Summarize(args)) => run_summarize(args).await,
        None => run_summarize(cli.summarize).await,
    }
}

fn print_languages() {
    let mut stdout = std::io::stdout().lock();
    for (code, name) in SUPPORTED_LANGUAGES {
        let _ = writeln!(stdout, "{:<6} {}", code, name);
    }
}

/// Load the configuration file, creating a default one when absent
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        return serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path));
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let config = Config::default();

    let config_json = serde_json::to_string_pretty(&config)
        .context("Failed to serialize default config to JSON")?;
    std::fs::write(config_path, config_json)
        .context(format!("Failed to write default config to file: {}", config_path))?;

    Ok(config)
}

/// Set the model on a provider entry, adding the entry when missing
fn override_model(providers: &mut Vec<ProviderConfig>, provider: ProviderType, model: &str) {
    let provider_str = provider.to_lowercase_string();
    match providers.iter_mut().find(|p| p.provider_type == provider_str) {
        Some(entry) => entry.model = model.to_string(),
        None => {
            let mut entry = ProviderConfig::new(provider);
            entry.model = model.to_string();
            providers.push(entry);
        }
    }
}

/// Set the API key on every entry of `provider` in both service sections
fn override_api_key(config: &mut Config, provider: ProviderType, api_key: &str) {
    if api_key.is_empty() {
        return;
    }

    let provider_str = provider.to_lowercase_string();
    for providers in [
        &mut config.translation.available_providers,
        &mut config.summarization.available_providers,
    ] {
        match providers.iter_mut().find(|p| p.provider_type == provider_str) {
            Some(entry) => entry.api_key = api_key.to_string(),
            None => {
                let mut entry = ProviderConfig::new(provider);
                entry.api_key = api_key.to_string();
                providers.push(entry);
            }
        }
    }
}

/// Apply command line overrides on top of the file configuration
fn apply_overrides(config: &mut Config, options: &SummarizeArgs) {
    if let Some(language) = &options.input_language {
        config.input_language = Some(language.clone());
    }
    if let Some(language) = &options.output_language {
        config.output_language = Some(language.clone());
    }
    if let Some(length) = options.length {
        config.summary_length = length;
    }
    if let Some(method) = &options.method {
        config.summary_method = method.clone().into();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    if let Some(provider) = &options.translation_provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &options.translation_model {
        let provider = config.translation.provider;
        override_model(&mut config.translation.available_providers, provider, model);
    }

    if let Some(provider) = &options.summarization_provider {
        config.summarization.provider = provider.clone().into();
    }
    if let Some(model) = &options.summarization_model {
        let provider = config.summarization.provider;
        override_model(&mut config.summarization.available_providers, provider, model);
    }

    if let Some(api_key) = &options.openai_api_key {
        override_api_key(config, ProviderType::OpenAI, api_key);
    }
    if let Some(api_key) = &options.anthropic_api_key {
        override_api_key(config, ProviderType::Anthropic, api_key);
    }
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

async fn run_summarize(options: SummarizeArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = load_or_create_config(&options.config_path)?;
    apply_overrides(&mut config, &options);

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(level_filter(&config.log_level));

    let controller = Controller::with_config(config)?;

    let mut request = controller.request();
    if let Some(text) = &options.text {
        request = request.with_text(text.clone());
    }
    if let Some(path) = &options.input_file {
        let upload = UploadedFile::from_path(path)
            .with_context(|| format!("Failed to load input file: {:?}", path))?;
        request = request.with_upload(upload);
    }

    let progress = spinner("Summarizing...");
    let outcome = controller.run(request).await;
    progress.finish_and_clear();

    match outcome {
        RunOutcome::Warning(_) => Ok(()),
        RunOutcome::Failed(failure) => Err(anyhow!("{}", failure)),
        RunOutcome::Completed(report) => {
            println!("{}", report.summary);

            let written = Controller::save_artifacts(
                &report,
                &options.output_dir,
                options.format.clone().into(),
                options.force_overwrite,
            )?;
            for path in &written {
                info!("Success: {:?}", path);
            }

            Ok(())
        }
    }
}
