//! CLI entrypoint for Quiz Randomizer
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use quiz_application::{
    GenerateQuizzesInput, GenerateQuizzesUseCase, GenerationLogger, LoadBankInput,
    LoadBankUseCase, NoGenerationLogger, NoProgress, ProgressNotifier,
};
use quiz_infrastructure::{
    ConfigLoader, DocxQuizExporter, FileConfig, FileDocumentReader, JsonlGenerationLogger,
    PdfQuizExporter, TextQuizExporter,
};
use quiz_presentation::{Cli, ConsoleFormatter, ProgressReporter};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging based on verbosity level, optionally teeing to a file.
///
/// The returned guard must live until exit so buffered file output is flushed.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path.file_name().unwrap_or(path.as_os_str());
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow!("Failed to load configuration: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref());

    info!("Starting Quiz Randomizer");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = load_config(&cli)?;
    for issue in config.validate() {
        warn!("{}", issue.message);
    }

    if cli.recent {
        print!("{}", ConsoleFormatter::recent_files(&config.recent_files));
        return Ok(());
    }

    let Some(bank_path) = cli.bank.clone() else {
        bail!("A question bank path is required. Run with --help for usage.");
    };
    if !config.is_known_extension(&bank_path) {
        warn!(
            "{} is not a listed bank type; reading it as plain text",
            bank_path.display()
        );
    }

    // === Dependency Injection ===
    let logger: Arc<dyn GenerationLogger> = match &cli.run_log {
        Some(path) => Arc::new(
            JsonlGenerationLogger::open(path)
                .with_context(|| format!("Failed to open run log {}", path.display()))?,
        ),
        None => Arc::new(NoGenerationLogger),
    };

    let (base_parse, _) = config.parsing.to_parse_options();
    let load_input =
        LoadBankInput::new(&bank_path).with_parse_options(cli.parse_options(base_parse));
    let loaded = LoadBankUseCase::new(Arc::new(FileDocumentReader::new()))
        .with_logger(logger.clone())
        .execute(load_input)
        .with_context(|| format!("Failed to load question bank {}", bank_path.display()))?;

    if !cli.no_config
        && let Err(e) = ConfigLoader::record_recent_file(&bank_path)
    {
        warn!("Could not update recent files: {}", e);
    }

    if cli.list && cli.json {
        println!("{}", ConsoleFormatter::question_list_json(&loaded.bank));
        return Ok(());
    }

    if !cli.quiet {
        println!("{}", ConsoleFormatter::header(&config.gui.title));
        println!();
        print!("{}", ConsoleFormatter::bank_summary(&bank_path, &loaded));
    }

    if cli.list {
        print!("{}", ConsoleFormatter::question_list(&loaded.bank));
        return Ok(());
    }

    let (base_params, _) = config.quiz_defaults.to_generation_params();
    let params = cli.generation_params(base_params);
    let (docx_style, _) = config.formatting.docx.to_docx_style();
    let (pdf_style, _) = config.formatting.pdf.to_pdf_style();

    let use_case = GenerateQuizzesUseCase::new()
        .with_exporter(Arc::new(TextQuizExporter))
        .with_exporter(Arc::new(DocxQuizExporter::new(docx_style)))
        .with_exporter(Arc::new(PdfQuizExporter::new(pdf_style)))
        .with_logger(logger);

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let output = use_case
        .execute_with_progress(
            GenerateQuizzesInput::new(loaded.bank, params.clone()),
            progress.as_ref(),
        )
        .context("Quiz generation failed")?;

    print!("{}", ConsoleFormatter::generation_summary(&params, &output));

    let failed = output.failed().count();
    if failed > 0 {
        bail!("{} of {} quizzes could not be written", failed, output.reports.len());
    }

    Ok(())
}
