//! Settings descriptor source
//!
//! The engine never owns settings. It reads declared properties and current
//! values from a `SettingsSource`, writes edits back by name, and asks the
//! source to persist when the host confirms a save.
//!
//! `JsonSettingsStore` is a reference source that keeps the schema and
//! values in one JSON file.

use crate::model::option_wrapper::OptionWrapper;
use crate::model::value::{SettingValue, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// How a property is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreType {
    /// A bare value of the given type
    Plain { value_type: ValueType },
    /// A value bundled with tree/group/description metadata
    Option { inner: ValueType },
    /// Any other generic container; never editable
    Generic { name: String },
}

/// A stored value, matching the property's `StoreType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreValue {
    Plain { value: SettingValue },
    Wrapped { option: OptionWrapper },
}

impl StoreValue {
    pub fn plain(value: SettingValue) -> Self {
        StoreValue::Plain { value }
    }

    pub fn wrapped(option: OptionWrapper) -> Self {
        StoreValue::Wrapped { option }
    }

    /// The editable value, regardless of wrapping
    pub fn value(&self) -> &SettingValue {
        match self {
            StoreValue::Plain { value } => value,
            StoreValue::Wrapped { option } => &option.value,
        }
    }
}

/// A declared settings property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    #[serde(rename = "type")]
    pub store_type: StoreType,
    /// Serialized default value; for wrapped properties this also carries
    /// the display metadata
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default = "default_true")]
    pub writable: bool,
}

fn default_true() -> bool {
    true
}

impl PropertySpec {
    pub fn plain(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            store_type: StoreType::Plain { value_type },
            default: None,
            writable: true,
        }
    }

    pub fn option(name: impl Into<String>, inner: ValueType, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            store_type: StoreType::Option { inner },
            default: Some(default.into()),
            writable: true,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }
}

/// Errors reported by a settings source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    UnknownSetting(String),
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownSetting(name) => write!(f, "Unknown setting: {name}"),
            StoreError::IoError(msg) => write!(f, "IO error: {msg}"),
            StoreError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            StoreError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The external collaborator that owns the settings
pub trait SettingsSource {
    /// Number of declared properties
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declared properties in declaration order
    fn properties(&self) -> Vec<PropertySpec>;

    /// Current value of a property, if one has been set
    fn get(&self, name: &str) -> Option<StoreValue>;

    /// Write a property's value
    fn set(&mut self, name: &str, value: StoreValue) -> Result<(), StoreError>;

    /// Persist all values
    fn save(&mut self) -> Result<(), StoreError>;
}

/// On-disk layout of a `JsonSettingsStore`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    properties: Vec<PropertySpec>,
    #[serde(default)]
    values: HashMap<String, StoreValue>,
}

/// A settings source kept in a single JSON file
#[derive(Debug, Clone, Default)]
pub struct JsonSettingsStore {
    properties: Vec<PropertySpec>,
    values: HashMap<String, StoreValue>,
    path: Option<PathBuf>,
    save_count: usize,
}

impl JsonSettingsStore {
    /// An in-memory store; `save` only counts
    pub fn new(properties: Vec<PropertySpec>) -> Self {
        Self {
            properties,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, value: StoreValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Load a store from a JSON file; `save` writes back to the same file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| StoreError::IoError(e.to_string()))?;
        let file: SettingsFile =
            serde_json::from_str(&contents).map_err(|e| StoreError::ParseError(e.to_string()))?;

        tracing::debug!(
            "Loaded {} settings from {}",
            file.properties.len(),
            path.as_ref().display()
        );

        Ok(Self {
            properties: file.properties,
            values: file.values,
            path: Some(path.as_ref().to_path_buf()),
            save_count: 0,
        })
    }

    /// Attach a file path used by `save`
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// How many times `save` has succeeded
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl SettingsSource for JsonSettingsStore {
    fn len(&self) -> usize {
        self.properties.len()
    }

    fn properties(&self) -> Vec<PropertySpec> {
        self.properties.clone()
    }

    fn get(&self, name: &str) -> Option<StoreValue> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: StoreValue) -> Result<(), StoreError> {
        if !self.properties.iter().any(|p| p.name == name) {
            return Err(StoreError::UnknownSetting(name.to_string()));
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    fn save(&mut self) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            let file = SettingsFile {
                properties: self.properties.clone(),
                values: self.values.clone(),
            };
            let contents = serde_json::to_string_pretty(&file)
                .map_err(|e| StoreError::SerializeError(e.to_string()))?;
            std::fs::write(path, contents).map_err(|e| StoreError::IoError(e.to_string()))?;
            tracing::info!("Saved settings to {}", path.display());
        }
        self.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_store() -> JsonSettingsStore {
        JsonSettingsStore::new(vec![
            PropertySpec::plain("Retries", ValueType::I32).with_default("3"),
            PropertySpec::option("Timeout", ValueType::U16, "30|Network|Limits|Seconds"),
        ])
    }

    #[test]
    fn test_set_unknown_setting_fails() {
        let mut store = sample_store();
        let result = store.set("Missing", StoreValue::plain(SettingValue::Bool(true)));
        assert!(matches!(result, Err(StoreError::UnknownSetting(_))));
    }

    #[test]
    fn test_in_memory_save_counts() {
        let mut store = sample_store();
        store.save().unwrap();
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_save_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let mut store = sample_store().with_path(&path);
        store
            .set("Retries", StoreValue::plain(SettingValue::I32(5)))
            .unwrap();
        store.save().unwrap();

        let reopened = JsonSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(
            reopened.get("Retries"),
            Some(StoreValue::plain(SettingValue::I32(5)))
        );
        assert_eq!(reopened.properties()[1].name, "Timeout");
    }

    #[test]
    fn test_open_parses_schema_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{
                "properties": [
                    { "name": "Theme", "type": { "kind": "plain", "value_type": { "type": "enum", "name": "Palette", "members": ["Light", "Dark"] } }, "default": "Dark" },
                    { "name": "Items", "type": { "kind": "generic", "name": "List" }, "writable": false }
                ]
            }"#,
        )
        .unwrap();

        let store = JsonSettingsStore::open(&path).unwrap();
        let properties = store.properties();
        assert_eq!(properties.len(), 2);
        assert!(matches!(
            &properties[0].store_type,
            StoreType::Plain { value_type: ValueType::Enum(e) } if e.members.len() == 2
        ));
        assert!(!properties[1].writable);
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let result = JsonSettingsStore::open("/nonexistent/settings.json");
        assert!(matches!(result, Err(StoreError::IoError(_))));
    }
}
