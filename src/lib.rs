// Settings editor library - exposes all core modules for testing

pub mod config;
pub mod model;
pub mod source;
pub mod view;

#[cfg(feature = "runtime")]
pub mod services;

pub use config::TreeViewOptions;
pub use source::{JsonSettingsStore, PropertySpec, SettingsSource, StoreError, StoreType, StoreValue};
pub use view::settings::{SessionError, SettingsHost, SettingsSession};
