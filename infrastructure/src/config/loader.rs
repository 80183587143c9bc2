//! Configuration file loader with multi-source merging

use super::file_config::{FileConfig, push_recent_file};
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const PROJECT_CONFIG_NAMES: [&str; 2] = ["quiz-randomizer.toml", ".quiz-randomizer.toml"];
const APP_DIR: &str = "quiz-randomizer";

/// Errors while writing the global config file
#[derive(Error, Debug)]
pub enum ConfigSaveError {
    #[error("no config directory available on this platform")]
    NoConfigDir,

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./quiz-randomizer.toml` or `./.quiz-randomizer.toml`
    /// 3. Global: `$XDG_CONFIG_HOME/quiz-randomizer/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut layers = Vec::new();

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            layers.push(global_path);
        }

        if let Some(project_path) = Self::project_config_path() {
            layers.push(project_path);
        }

        if let Some(path) = config_path {
            layers.push(path.clone());
        }

        Self::load_layers(&layers)
    }

    /// Merge the given files over the defaults, later files winning
    pub fn load_layers(layers: &[PathBuf]) -> Result<FileConfig, Box<figment::Error>> {
        let figment = layers.iter().fold(
            Figment::new().merge(Serialized::defaults(FileConfig::default())),
            |figment, path| {
                debug!("Merging config file {}", path.display());
                figment.merge(Toml::file(path))
            },
        );
        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/quiz-randomizer/config.toml if set,
    /// otherwise the platform config directory equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Record a loaded bank in the global config's recent files
    pub fn record_recent_file(bank: &Path) -> Result<PathBuf, ConfigSaveError> {
        let path = Self::global_config_path().ok_or(ConfigSaveError::NoConfigDir)?;
        Self::record_recent_file_at(&path, bank)?;
        Ok(path)
    }

    /// Record a loaded bank in the recent files of the config at `config_path`.
    ///
    /// The file is edited as a raw TOML table: only `recent_files` changes,
    /// and keys the user never wrote are not filled in with defaults.
    pub fn record_recent_file_at(config_path: &Path, bank: &Path) -> Result<(), ConfigSaveError> {
        let io_error = |source| ConfigSaveError::Io {
            path: config_path.to_path_buf(),
            source,
        };

        let mut table = if config_path.exists() {
            fs::read_to_string(config_path)
                .map_err(io_error)?
                .parse::<toml::Table>()
                .map_err(|source| ConfigSaveError::Parse {
                    path: config_path.to_path_buf(),
                    source,
                })?
        } else {
            toml::Table::new()
        };

        let mut recent: Vec<String> = table
            .get("recent_files")
            .and_then(toml::Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        let absolute = fs::canonicalize(bank).unwrap_or_else(|_| bank.to_path_buf());
        push_recent_file(&mut recent, &absolute);
        table.insert(
            "recent_files".to_string(),
            toml::Value::Array(recent.into_iter().map(toml::Value::String).collect()),
        );

        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(config_path, toml::to_string_pretty(&table)?).map_err(io_error)?;
        debug!("Recorded {} in {}", absolute.display(), config_path.display());
        Ok(())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./quiz-randomizer.toml or ./.quiz-randomizer.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.quiz_defaults.num_quizzes, 5);
        assert!(config.recent_files.is_empty());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("quiz-randomizer"));
    }

    #[test]
    fn test_later_layers_win() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        fs::write(&global, "[quiz_defaults]\nnum_quizzes = 2\nquestions_per_quiz = 7\n").unwrap();
        fs::write(&project, "[quiz_defaults]\nnum_quizzes = 9\n").unwrap();

        let config = ConfigLoader::load_layers(&[global, project]).unwrap();
        assert_eq!(config.quiz_defaults.num_quizzes, 9);
        assert_eq!(config.quiz_defaults.questions_per_quiz, 7);
        assert!(!config.quiz_defaults.allow_duplicates);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[quiz_defaults\nnum_quizzes = ").unwrap();
        assert!(ConfigLoader::load_layers(&[path]).is_err());
    }

    #[test]
    fn test_record_recent_file_creates_and_updates() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");
        let bank = dir.path().join("bank.txt");
        fs::write(&bank, "Q?").unwrap();

        ConfigLoader::record_recent_file_at(&config_path, &bank).unwrap();
        ConfigLoader::record_recent_file_at(&config_path, &bank).unwrap();

        let config = ConfigLoader::load_layers(&[config_path]).unwrap();
        assert_eq!(config.recent_files.len(), 1);
        assert!(config.recent_files[0].ends_with("bank.txt"));
    }

    #[test]
    fn test_record_recent_file_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[quiz_defaults]\nnum_quizzes = 3\n").unwrap();

        ConfigLoader::record_recent_file_at(&config_path, Path::new("missing.docx")).unwrap();

        let config = ConfigLoader::load_layers(&[config_path.clone()]).unwrap();
        assert_eq!(config.quiz_defaults.num_quizzes, 3);
        assert_eq!(config.recent_files, vec!["missing.docx"]);

        let written = fs::read_to_string(&config_path).unwrap();
        assert!(!written.contains("window_width"));
        assert!(!written.contains("questions_per_quiz"));
        assert!(!written.contains("[formatting"));
    }

    #[test]
    fn test_record_recent_file_rejects_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "recent_files = [").unwrap();
        assert!(matches!(
            ConfigLoader::record_recent_file_at(&config_path, Path::new("bank.txt")),
            Err(ConfigSaveError::Parse { .. })
        ));
    }
}
