use crate::model::option_wrapper::DEFAULT_SEPARATOR;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling how settings are grouped, labelled and edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TreeViewOptions {
    /// Show only the part of a tree label after its first `_`.
    /// Sorting still uses the full label, so `1_General` sorts before `2_Advanced`.
    #[serde(default = "default_false")]
    pub tree_sort_before_separator: bool,

    /// Show only the part of a group label after its first `_`
    #[serde(default = "default_false")]
    pub group_sort_before_separator: bool,

    /// Label ungrouped settings "Default" instead of leaving the group blank
    #[serde(default = "default_true")]
    pub show_default_group_name: bool,

    /// Decimal places shown for floating-point settings
    #[serde(default = "default_decimal_places")]
    pub floating_point_decimal_places: u32,

    /// How long a description tooltip stays visible
    #[serde(default = "default_tooltip_duration")]
    pub tooltip_duration_ms: u64,

    /// Insert spaces between camel-case words of group labels
    #[serde(default = "default_true")]
    pub camel_case_split_group_name: bool,

    /// Insert spaces between camel-case words of setting labels
    #[serde(default = "default_true")]
    pub camel_case_split_label_name: bool,

    /// Also split between letters and digits: `Abc123DefGhi` => `Abc 123 Def Ghi`
    #[serde(default = "default_false")]
    pub camel_case_split_on_digits: bool,

    /// Field separator in the serialized form of wrapped settings
    #[serde(default = "default_separator")]
    pub option_wrapper_separator: char,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_decimal_places() -> u32 {
    2
}

fn default_tooltip_duration() -> u64 {
    10_000
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

/// Largest decimal place count a spinner can show without losing precision
pub const MAX_DECIMAL_PLACES: u32 = 15;

impl Default for TreeViewOptions {
    fn default() -> Self {
        Self {
            tree_sort_before_separator: false,
            group_sort_before_separator: false,
            show_default_group_name: true,
            floating_point_decimal_places: default_decimal_places(),
            tooltip_duration_ms: default_tooltip_duration(),
            camel_case_split_group_name: true,
            camel_case_split_label_name: true,
            camel_case_split_on_digits: false,
            option_wrapper_separator: DEFAULT_SEPARATOR,
        }
    }
}

impl TreeViewOptions {
    /// Load options from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let options: TreeViewOptions =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        options.validate()?;
        Ok(options)
    }

    /// Save options to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floating_point_decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::ValidationError(format!(
                "floating_point_decimal_places must be <= {MAX_DECIMAL_PLACES}"
            )));
        }

        if self.option_wrapper_separator.is_alphanumeric()
            || self.option_wrapper_separator.is_whitespace()
        {
            return Err(ConfigError::ValidationError(format!(
                "option_wrapper_separator must be a punctuation character, got {:?}",
                self.option_wrapper_separator
            )));
        }

        Ok(())
    }
}

/// JSON Schema describing `TreeViewOptions`
pub fn options_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(TreeViewOptions);
    serde_json::to_value(&schema).unwrap_or(serde_json::Value::Null)
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
