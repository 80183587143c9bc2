//! Window settings from TOML (`[gui]` section)

use serde::{Deserialize, Serialize};

/// Raw window configuration; the console front end only uses the title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGuiConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
}

impl Default for FileGuiConfig {
    fn default() -> Self {
        Self {
            window_width: 600,
            window_height: 500,
            title: "Quiz Randomizer".to_string(),
        }
    }
}
