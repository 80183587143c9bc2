//! CLI command definitions

use clap::{Parser, ValueEnum};
use quiz_application::GenerationParams;
use quiz_domain::{EmphasisMode, OutputFormat, ParseOptions};
use std::path::PathBuf;

/// File format for generated quizzes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Plain text (.txt)
    #[value(alias = "txt")]
    Text,
    /// Word document (.docx)
    Docx,
    /// PDF document (.pdf)
    Pdf,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Docx => OutputFormat::Docx,
            FormatArg::Pdf => OutputFormat::Pdf,
        }
    }
}

/// Which bold runs of a DOCX option are kept as emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmphasisArg {
    /// Only the first bold run of each option
    FirstRun,
    /// Every bold run of each option
    AllRuns,
}

impl From<EmphasisArg> for EmphasisMode {
    fn from(arg: EmphasisArg) -> Self {
        match arg {
            EmphasisArg::FirstRun => EmphasisMode::FirstRun,
            EmphasisArg::AllRuns => EmphasisMode::AllRuns,
        }
    }
}

/// CLI arguments for quiz-randomizer
#[derive(Parser, Debug)]
#[command(name = "quiz-randomizer")]
#[command(author, version, about = "Generate randomized quizzes from a question bank")]
#[command(long_about = r#"
Quiz Randomizer reads a question bank and writes several randomized quizzes.

Supported banks:
  .txt    Blank-line separated blocks (stem, a)/1. options, Answer Feedback:)
  .rtf    Same layout as plain text
  .docx   Paragraph-level parsing; bold option text is kept as emphasis

Configuration files are loaded from (in priority order):
1. --config <path>              Explicit config file
2. ./quiz-randomizer.toml       Project-level config
3. ~/.config/quiz-randomizer/config.toml   Global config

Example:
  quiz-randomizer bank.docx
  quiz-randomizer bank.txt -n 3 -q 20 -f pdf -o out/
  quiz-randomizer bank.docx --list
"#)]
pub struct Cli {
    /// Question bank to read (.txt, .rtf or .docx)
    pub bank: Option<PathBuf>,

    /// Number of quizzes to generate [config: quiz_defaults.num_quizzes]
    #[arg(short = 'n', long = "quizzes", value_name = "COUNT")]
    pub quizzes: Option<usize>,

    /// Questions per quiz [config: quiz_defaults.questions_per_quiz]
    #[arg(short = 'q', long = "questions", value_name = "COUNT")]
    pub questions: Option<usize>,

    /// Allow the same question to appear more than once [config: quiz_defaults.allow_duplicates]
    #[arg(short = 'd', long)]
    pub allow_duplicates: bool,

    /// Keep questions unique within a quiz even when the config allows duplicates
    #[arg(long, conflicts_with = "allow_duplicates")]
    pub no_allow_duplicates: bool,

    /// Output file format [config: quiz_defaults.output_format]
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Directory for the generated quizzes [config: quiz_defaults.output_directory]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Seed for a reproducible shuffle
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Print the parsed bank and exit without generating
    #[arg(long)]
    pub list: bool,

    /// With --list, print the bank as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Emphasis handling for DOCX banks [config: parsing.emphasis]
    #[arg(long, value_enum)]
    pub emphasis: Option<EmphasisArg>,

    /// Keep DOCX stems that have no options as free-response questions
    #[arg(long)]
    pub keep_unanswered: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(long)]
    pub quiet: bool,

    /// Also write diagnostics to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append a JSONL record of this run to this file
    #[arg(long, value_name = "PATH")]
    pub run_log: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List recently used banks and exit
    #[arg(long)]
    pub recent: bool,
}

impl Cli {
    /// Apply command-line overrides to config-derived parameters
    pub fn generation_params(&self, base: GenerationParams) -> GenerationParams {
        let mut params = base.with_seed(self.seed);
        if let Some(count) = self.quizzes {
            params = params.with_quiz_count(count);
        }
        if let Some(count) = self.questions {
            params = params.with_questions_per_quiz(count);
        }
        if self.allow_duplicates {
            params = params.with_duplicates(true);
        } else if self.no_allow_duplicates {
            params = params.with_duplicates(false);
        }
        if let Some(format) = self.format {
            params = params.with_output_format(format.into());
        }
        if let Some(dir) = &self.output_dir {
            params = params.with_output_dir(dir);
        }
        params
    }

    /// Apply command-line overrides to config-derived parser options
    pub fn parse_options(&self, base: ParseOptions) -> ParseOptions {
        let mut options = base;
        if let Some(emphasis) = self.emphasis {
            options = options.with_emphasis(emphasis.into());
        }
        if self.keep_unanswered {
            options = options.with_keep_unanswered_stems(true);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("quiz-randomizer").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults_leave_config_untouched() {
        let cli = parse(&["bank.docx"]);
        let base = GenerationParams::default().with_quiz_count(7);
        assert_eq!(cli.generation_params(base.clone()), base);
        assert_eq!(cli.parse_options(ParseOptions::default()), ParseOptions::default());
        assert_eq!(cli.bank, Some(PathBuf::from("bank.docx")));
    }

    #[test]
    fn test_overrides() {
        let cli = parse(&[
            "bank.txt", "-n", "3", "-q", "4", "-d", "-f", "txt", "-o", "out", "--seed", "42",
        ]);
        let params = cli.generation_params(GenerationParams::default());
        assert_eq!(params.quiz_count, 3);
        assert_eq!(params.questions_per_quiz, 4);
        assert!(params.allow_duplicates);
        assert_eq!(params.output_format, OutputFormat::Text);
        assert_eq!(params.output_dir, PathBuf::from("out"));
        assert_eq!(params.seed, Some(42));
    }

    #[test]
    fn test_no_allow_duplicates_overrides_config() {
        let base = GenerationParams::default().with_duplicates(true);

        let cli = parse(&["bank.txt", "--no-allow-duplicates"]);
        assert!(!cli.generation_params(base.clone()).allow_duplicates);

        let cli = parse(&["bank.txt"]);
        assert!(cli.generation_params(base).allow_duplicates);

        assert!(
            Cli::try_parse_from(["quiz-randomizer", "bank.txt", "-d", "--no-allow-duplicates"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_option_overrides() {
        let cli = parse(&["bank.docx", "--emphasis", "all-runs", "--keep-unanswered"]);
        let options = cli.parse_options(ParseOptions::default());
        assert_eq!(options.emphasis, EmphasisMode::AllRuns);
        assert!(options.keep_unanswered_stems);
    }

    #[test]
    fn test_verbosity_count() {
        assert_eq!(parse(&["-vvv", "bank.txt"]).verbose, 3);
    }

    #[test]
    fn test_json_requires_list() {
        assert!(Cli::try_parse_from(["quiz-randomizer", "bank.txt", "--json"]).is_err());
        assert!(parse(&["bank.txt", "--list", "--json"]).json);
    }

    #[test]
    fn test_bank_optional_for_info_flags() {
        assert!(parse(&["--show-config"]).bank.is_none());
        assert!(parse(&["--recent"]).recent);
    }
}
