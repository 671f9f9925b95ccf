//! Setting discovery
//!
//! Reads the declared properties of a settings source and turns each
//! editable one into a classified `SettingDescriptor`.

use super::classify::{classify, WidgetPlan};
use super::ordering::order;
use super::session::SessionError;
use crate::config::TreeViewOptions;
use crate::model::fonts::FontCatalog;
use crate::model::option_wrapper::OptionWrapper;
use crate::model::value::{SettingValue, ValueType};
use crate::source::{PropertySpec, SettingsSource, StoreType, StoreValue};

/// Label used for settings without a tree or group
pub const DEFAULT_LABEL: &str = "Default";

/// One editable setting, fixed at discovery time
#[derive(Debug, Clone, PartialEq)]
pub struct SettingDescriptor {
    /// Property name used for write-back
    pub name: String,
    /// Value when the session started
    pub value: SettingValue,
    /// Declared type of the editable value (the inner type for wrapped settings)
    pub value_type: ValueType,
    /// Whether the value lives inside an "Option" wrapper
    pub wrapped: bool,
    pub tree_label: String,
    pub group_label: String,
    pub description: Option<String>,
    /// Discovery index; final tie-break so equal labels keep declaration order
    pub sequence: u32,
    pub plan: WidgetPlan,
}

/// Discover, classify and order all editable settings of a source.
///
/// Fails when the source declares nothing or when nothing it declares can
/// be edited. Read-only properties and properties without an editor are
/// skipped.
pub fn prepare<S: SettingsSource + ?Sized>(
    source: &mut S,
    options: &TreeViewOptions,
    fonts: &dyn FontCatalog,
) -> Result<Vec<SettingDescriptor>, SessionError> {
    Ok(order(discover(source, options, fonts)?))
}

/// Discover settings in declaration order
pub fn discover<S: SettingsSource + ?Sized>(
    source: &mut S,
    options: &TreeViewOptions,
    fonts: &dyn FontCatalog,
) -> Result<Vec<SettingDescriptor>, SessionError> {
    if source.is_empty() {
        return Err(SessionError::EmptySource);
    }

    let mut descriptors = Vec::new();
    let mut sequence = 0u32;

    for property in source.properties() {
        if !property.writable {
            tracing::debug!("Skipping read-only setting {}", property.name);
            continue;
        }

        let plan = classify(&property.store_type, options, fonts);
        if let WidgetPlan::Unsupported { reason } = &plan {
            tracing::debug!("Skipping setting {}: {}", property.name, reason);
            continue;
        }

        let resolved = match &property.store_type {
            StoreType::Plain { value_type } => Some(resolve_plain(source, &property, value_type)),
            StoreType::Option { inner } => {
                resolve_wrapped(source, &property, inner, options.option_wrapper_separator)
            }
            StoreType::Generic { .. } => None,
        };
        let Some(resolved) = resolved else {
            continue;
        };

        let tree_label = if resolved.tree.is_empty() {
            DEFAULT_LABEL.to_string()
        } else {
            resolved.tree
        };
        let group_label = match (resolved.group.is_empty(), options.show_default_group_name) {
            (false, _) => resolved.group,
            (true, true) => DEFAULT_LABEL.to_string(),
            (true, false) => String::new(),
        };

        descriptors.push(SettingDescriptor {
            name: property.name,
            value: resolved.value,
            value_type: resolved.value_type,
            wrapped: resolved.wrapped,
            tree_label,
            group_label,
            description: Some(resolved.description).filter(|d| !d.is_empty()),
            sequence,
            plan,
        });
        sequence += 1;
    }

    if descriptors.is_empty() {
        return Err(SessionError::NoEditableSettings);
    }

    tracing::debug!("Discovered {} editable settings", descriptors.len());
    Ok(descriptors)
}

struct Resolved {
    value: SettingValue,
    value_type: ValueType,
    wrapped: bool,
    tree: String,
    group: String,
    description: String,
}

/// Current value of a plain property: stored value, else declared default,
/// else the type's zero value
fn resolve_plain<S: SettingsSource + ?Sized>(
    source: &S,
    property: &PropertySpec,
    value_type: &ValueType,
) -> Resolved {
    let stored = source.get(&property.name).and_then(|stored| {
        value_type
            .coerce(stored.value())
            .map_err(|e| tracing::warn!("Ignoring stored value of {}: {}", property.name, e))
            .ok()
    });

    let value = stored
        .or_else(|| {
            property
                .default
                .as_deref()
                .and_then(|d| value_type.parse(d).ok())
        })
        .unwrap_or_else(|| value_type.default_value());

    Resolved {
        value,
        value_type: value_type.clone(),
        wrapped: false,
        tree: String::new(),
        group: String::new(),
        description: String::new(),
    }
}

/// Current value and metadata of a wrapped property.
///
/// Metadata always comes from the declared default. A property with no
/// stored wrapper is seeded with the default so later writes only touch the
/// inner value.
fn resolve_wrapped<S: SettingsSource + ?Sized>(
    source: &mut S,
    property: &PropertySpec,
    inner: &ValueType,
    separator: char,
) -> Option<Resolved> {
    let default_text = property.default.as_deref().unwrap_or_default();
    let defaults = match OptionWrapper::parse(default_text, inner, separator) {
        Ok(defaults) => defaults,
        Err(e) => {
            tracing::warn!("Skipping setting {}: bad default: {}", property.name, e);
            return None;
        }
    };

    let stored = match source.get(&property.name) {
        Some(StoreValue::Wrapped { option }) => inner
            .coerce(&option.value)
            .map_err(|e| tracing::warn!("Ignoring stored value of {}: {}", property.name, e))
            .ok(),
        _ => None,
    };

    let value = match stored {
        Some(value) => value,
        None => {
            if let Err(e) = source.set(&property.name, StoreValue::wrapped(defaults.clone())) {
                tracing::warn!("Could not seed default for {}: {}", property.name, e);
            }
            defaults.value.clone()
        }
    };

    Some(Resolved {
        value,
        value_type: inner.clone(),
        wrapped: true,
        tree: defaults.tree_name,
        group: defaults.group_name,
        description: defaults.description,
    })
}
