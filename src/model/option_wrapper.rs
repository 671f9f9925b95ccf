//! The generic "Option" wrapper
//!
//! A wrapped property stores its value together with the display metadata
//! that places it in the navigation tree. The serialized form is
//! `value|tree|group|description`, split on a configurable separator.

use super::value::{ConversionError, SettingValue, ValueType};
use serde::{Deserialize, Serialize};

/// Separator used when none is configured
pub const DEFAULT_SEPARATOR: char = '|';

/// A value bundled with its tree, group and description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionWrapper {
    pub value: SettingValue,
    #[serde(default)]
    pub tree_name: String,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub description: String,
}

impl OptionWrapper {
    pub fn new(value: SettingValue) -> Self {
        Self {
            value,
            tree_name: String::new(),
            group_name: String::new(),
            description: String::new(),
        }
    }

    pub fn with_tree(mut self, tree_name: impl Into<String>) -> Self {
        self.tree_name = tree_name.into();
        self
    }

    pub fn with_group(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = group_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Parse the serialized form.
    ///
    /// Missing trailing fields are empty. The description is the remainder
    /// after the third separator, so it may itself contain separators.
    pub fn parse(
        text: &str,
        inner: &ValueType,
        separator: char,
    ) -> Result<Self, ConversionError> {
        let mut fields = text.splitn(4, separator);
        let raw_value = fields.next().unwrap_or_default();
        let value = inner.parse(raw_value)?;

        Ok(Self {
            value,
            tree_name: fields.next().unwrap_or_default().trim().to_string(),
            group_name: fields.next().unwrap_or_default().trim().to_string(),
            description: fields.next().unwrap_or_default().to_string(),
        })
    }

    /// Serialize back to `value|tree|group|description`
    pub fn format(&self, separator: char) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}",
            self.value,
            self.tree_name,
            self.group_name,
            self.description,
            sep = separator
        )
    }
}
