//! Settings editor
//!
//! Builds a navigable editor from the declared properties of a settings
//! source and keeps the source in sync with every edit.
//!
//! ## Architecture
//!
//! - `schema.rs` - Discover editable settings and resolve their values
//! - `classify.rs` - Pick an editor for each declared type
//! - `ordering.rs` - Sort settings and format their labels
//! - `compile.rs` - Build the widget tree in one pass
//! - `widgets.rs` - Widget arena and teardown
//! - `navigation.rs` - Keep exactly one content panel visible
//! - `binding.rs` - Convert edits and write them back
//! - `session.rs` - Dirty tracking, host prompts and lifecycle
//! - `render.rs` - Draw the editor with ratatui

pub mod binding;
pub mod classify;
pub mod compile;
pub mod navigation;
pub mod ordering;
pub mod render;
pub mod schema;
pub mod session;
pub mod widgets;

pub use binding::{EditOutcome, WidgetEdit};
pub use classify::{SpinnerPlan, WidgetPlan};
pub use compile::{compile, CompiledView, Row};
pub use navigation::{NavigationController, VisibilityEvent};
pub use render::{render_settings, SettingsHit, SettingsLayout};
pub use schema::{prepare, SettingDescriptor};
pub use session::{
    CloseDecision, SessionError, SettingsHost, SettingsSession, Tooltip, SAVE_PROMPT,
};
pub use widgets::{EditorControl, Handler, NodeId, WidgetKind, WidgetTree};
