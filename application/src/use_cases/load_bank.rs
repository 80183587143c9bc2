//! Load Bank use case
//!
//! Reads a bank file through the [`DocumentReader`] port and parses it into
//! shared question records.

use crate::ports::document_reader::{DocumentReader, ReadError};
use crate::ports::generation_logger::{GenerationEvent, GenerationLogger, NoGenerationLogger};
use quiz_domain::{ParseOptions, QuestionRecord, QuestionType, parse_source};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while loading a bank
#[derive(Error, Debug)]
pub enum LoadBankError {
    #[error("Question bank file {} not found", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read question bank {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ReadError,
    },
}

/// Input for the LoadBank use case
#[derive(Debug, Clone)]
pub struct LoadBankInput {
    /// Bank file to read
    pub path: PathBuf,
    /// Parser switches for structured documents
    pub parse: ParseOptions,
}

impl LoadBankInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            parse: ParseOptions::default(),
        }
    }

    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }
}

/// A loaded bank
#[derive(Debug, Clone)]
pub struct LoadBankOutput {
    pub bank: Vec<Arc<QuestionRecord>>,
    /// Kind of source the bank was parsed from ("plain-text", "structured")
    pub source_kind: &'static str,
}

impl LoadBankOutput {
    pub fn len(&self) -> usize {
        self.bank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bank.is_empty()
    }

    /// Number of records of the given type
    pub fn count_of(&self, question_type: QuestionType) -> usize {
        self.bank
            .iter()
            .filter(|q| q.question_type() == question_type)
            .count()
    }
}

/// Use case for loading a question bank
pub struct LoadBankUseCase<R: DocumentReader> {
    reader: Arc<R>,
    logger: Arc<dyn GenerationLogger>,
}

impl<R: DocumentReader> LoadBankUseCase<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            reader,
            logger: Arc::new(NoGenerationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn GenerationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn execute(&self, input: LoadBankInput) -> Result<LoadBankOutput, LoadBankError> {
        let source = self.reader.read(&input.path).map_err(|e| match e {
            ReadError::NotFound(_) => LoadBankError::FileNotFound {
                path: input.path.clone(),
            },
            other => LoadBankError::Read {
                path: input.path.clone(),
                source: other,
            },
        })?;

        let bank: Vec<_> = parse_source(&source, input.parse)
            .into_iter()
            .map(Arc::new)
            .collect();
        let output = LoadBankOutput {
            bank,
            source_kind: source.kind(),
        };

        if output.is_empty() {
            warn!("No questions found in {}", input.path.display());
        } else {
            info!(
                "Loaded {} questions from {} ({})",
                output.len(),
                input.path.display(),
                output.source_kind
            );
        }

        self.logger.log(GenerationEvent::new(
            "bank_loaded",
            json!({
                "path": input.path.display().to_string(),
                "source_kind": output.source_kind,
                "questions": output.len(),
                "multiple_choice": output.count_of(QuestionType::MultipleChoice),
                "true_false": output.count_of(QuestionType::TrueFalse),
                "free_response": output.count_of(QuestionType::FreeResponse),
            }),
        ));

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_domain::{Paragraph, SourceDocument};
    use std::path::Path;
    use std::sync::Mutex;

    // ==================== Test Doubles ====================

    struct StubReader {
        result: fn(&Path) -> Result<SourceDocument, ReadError>,
    }

    impl DocumentReader for StubReader {
        fn read(&self, path: &Path) -> Result<SourceDocument, ReadError> {
            (self.result)(path)
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(&'static str, serde_json::Value)>>,
    }

    impl GenerationLogger for RecordingLogger {
        fn log(&self, event: GenerationEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    fn use_case(result: fn(&Path) -> Result<SourceDocument, ReadError>) -> LoadBankUseCase<StubReader> {
        LoadBankUseCase::new(Arc::new(StubReader { result }))
    }

    // ==================== Tests ====================

    #[test]
    fn test_loads_plain_text_bank() {
        let uc = use_case(|_| {
            Ok(SourceDocument::PlainText(
                "What is 2 + 2?\na) 3\nb) 4\n\nTrue/False: water is wet".to_string(),
            ))
        });
        let output = uc.execute(LoadBankInput::new("bank.txt")).unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output.source_kind, "plain-text");
        assert_eq!(output.count_of(QuestionType::MultipleChoice), 1);
        assert_eq!(output.count_of(QuestionType::TrueFalse), 1);
    }

    #[test]
    fn test_parse_options_reach_structured_parser() {
        let uc = use_case(|_| {
            Ok(SourceDocument::Structured(vec![Paragraph::plain(
                "Explain the borrow checker",
            )]))
        });
        assert!(uc.execute(LoadBankInput::new("bank.docx")).unwrap().is_empty());

        let input = LoadBankInput::new("bank.docx")
            .with_parse_options(ParseOptions::default().with_keep_unanswered_stems(true));
        assert_eq!(uc.execute(input).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let uc = use_case(|p| Err(ReadError::NotFound(p.to_path_buf())));
        let err = uc.execute(LoadBankInput::new("missing.txt")).unwrap_err();
        assert!(matches!(err, LoadBankError::FileNotFound { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_read_error_keeps_source() {
        let uc = use_case(|_| Err(ReadError::Zip("bad header".to_string())));
        let err = uc.execute(LoadBankInput::new("bank.docx")).unwrap_err();
        match err {
            LoadBankError::Read { source, .. } => assert!(matches!(source, ReadError::Zip(_))),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_logs_bank_loaded_event() {
        let logger = Arc::new(RecordingLogger::default());
        let uc = use_case(|_| Ok(SourceDocument::PlainText("Explain traits".to_string())))
            .with_logger(logger.clone());
        uc.execute(LoadBankInput::new("bank.txt")).unwrap();

        let events = logger.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "bank_loaded");
        assert_eq!(events[0].1["questions"], 1);
        assert_eq!(events[0].1["free_response"], 1);
    }
}
