use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences for the entry shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Convert Kanji, Katakana and postal-code input to full width as it is
    /// typed instead of only on submit.
    #[serde(default)]
    pub convert_immediately: bool,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    /// Extra `tracing` directive appended to the environment filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            convert_immediately: false,
            ui_color_enabled: Self::default_ui_color_enabled(),
            log_filter: None,
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }
}
