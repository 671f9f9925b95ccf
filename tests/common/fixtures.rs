use option_tree::config::TreeViewOptions;
use option_tree::model::color::named_color_type;
use option_tree::model::fonts::FixedFontCatalog;
use option_tree::model::value::ValueType;
use option_tree::source::{JsonSettingsStore, PropertySpec, StoreType};
use option_tree::view::settings::SettingsSession;

/// Two trees: Network (Retries, Timeout under "Limits") and Display (Theme, ungrouped)
pub fn network_display_properties() -> Vec<PropertySpec> {
    vec![
        PropertySpec::option("Retries", ValueType::I32, "3|Network|Limits|How often to retry"),
        PropertySpec::option("Timeout", ValueType::I32, "30|Network|Limits"),
        PropertySpec::option(
            "Theme",
            ValueType::Enum(named_color_type()),
            "Red|Display",
        ),
    ]
}

pub fn network_display_store() -> JsonSettingsStore {
    JsonSettingsStore::new(network_display_properties())
}

/// Properties the editor can not or must not edit
pub fn uneditable_properties() -> Vec<PropertySpec> {
    vec![
        PropertySpec::plain("InstallId", ValueType::Text).read_only(),
        PropertySpec {
            name: "Plugins".to_string(),
            store_type: StoreType::Generic {
                name: "List<String>".to_string(),
            },
            default: None,
            writable: true,
        },
        PropertySpec::option(
            "Origin",
            ValueType::Other {
                name: "Point".to_string(),
            },
            "0,0|Display",
        ),
    ]
}

pub fn session_for(store: JsonSettingsStore) -> SettingsSession<JsonSettingsStore> {
    session_with_options(store, TreeViewOptions::default())
}

pub fn session_with_options(
    store: JsonSettingsStore,
    options: TreeViewOptions,
) -> SettingsSession<JsonSettingsStore> {
    SettingsSession::new(store, options, &FixedFontCatalog::default())
        .expect("fixture store should produce a session")
}
