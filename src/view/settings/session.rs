//! Settings session
//!
//! A session owns the settings source for the lifetime of one editor. It
//! discovers and compiles the settings once, routes edits from the widgets
//! back to the source, tracks whether anything was written, and asks the
//! host whether to save when the editor closes.

use std::fmt;
use std::time::Duration;

use crossterm::event::KeyEvent;

use super::binding::{self, EditOutcome, Intent, WidgetEdit};
use super::compile::{compile, CompiledView, Row};
use super::navigation::VisibilityEvent;
use super::schema::{prepare, SettingDescriptor};
use super::widgets::{EditorControl, Handler, NodeId};
use crate::config::{ConfigError, TreeViewOptions};
use crate::model::fonts::FontCatalog;
use crate::source::{SettingsSource, StoreError};
use crate::view::controls::dropdown::DropdownEvent;
use crate::view::controls::number_input::NumberInputEvent;
use crate::view::controls::text_input::TextInputEvent;
use crate::view::controls::toggle::ToggleEvent;
use crate::view::controls::FocusState;

/// Question asked when closing with unsaved edits
pub const SAVE_PROMPT: &str = "Do you want to save settings before leaving?";

/// Errors that stop a session from being built or saved
#[derive(Debug)]
pub enum SessionError {
    /// The source declares no properties at all
    EmptySource,
    /// The source declares properties but none can be edited
    NoEditableSettings,
    /// Compilation was given nothing to build
    EmptyInput,
    /// The view options failed validation
    Config(ConfigError),
    Store(StoreError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptySource => write!(f, "Settings source declares no properties"),
            SessionError::NoEditableSettings => {
                write!(f, "Settings source has no editable properties")
            }
            SessionError::EmptyInput => write!(f, "No settings to build a view for"),
            SessionError::Config(e) => write!(f, "Invalid view options: {e}"),
            SessionError::Store(e) => write!(f, "Settings store error: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Config(e) => Some(e),
            SessionError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        SessionError::Config(e)
    }
}

impl From<StoreError> for SessionError {
    fn from(e: StoreError) -> Self {
        SessionError::Store(e)
    }
}

/// What the editor needs from whoever is showing it
pub trait SettingsHost {
    /// Ask a yes/no question
    fn confirm(&mut self, question: &str) -> bool;

    /// Show an error with its technical detail
    fn report_error(&mut self, message: &str, detail: &str);

    /// Show an informational message
    fn notify(&mut self, message: &str);
}

/// Description shown while the pointer rests on a setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub text: String,
    pub duration: Duration,
}

/// How closing the editor went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// Nothing was written
    Clean,
    /// The host agreed and the source was saved
    Saved,
    /// The host declined; edits stay in the source unsaved
    Discarded,
}

pub struct SettingsSession<S: SettingsSource> {
    source: S,
    options: TreeViewOptions,
    descriptors: Vec<SettingDescriptor>,
    view: CompiledView,
    dirty: bool,
    focused: Option<NodeId>,
}

impl<S: SettingsSource> SettingsSession<S> {
    /// Discover, order and compile the settings of `source`
    pub fn new(
        mut source: S,
        options: TreeViewOptions,
        fonts: &dyn FontCatalog,
    ) -> Result<Self, SessionError> {
        options.validate()?;
        let descriptors = prepare(&mut source, &options, fonts)?;
        let view = compile(&descriptors, &options)?;

        tracing::info!(
            "Settings session ready: {} settings in {} panels",
            descriptors.len(),
            view.panels.len()
        );

        Ok(Self {
            source,
            options,
            descriptors,
            view,
            dirty: false,
            focused: None,
        })
    }

    pub fn descriptors(&self) -> &[SettingDescriptor] {
        &self.descriptors
    }

    pub fn view(&self) -> &CompiledView {
        &self.view
    }

    pub fn options(&self) -> &TreeViewOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn navigation_labels(&self) -> Vec<String> {
        self.view.navigation_labels()
    }

    pub fn visible_panel(&self) -> Option<usize> {
        self.view.visible_panel()
    }

    /// Rows shown in panel `index`, in display order
    pub fn panel_rows(&self, index: usize) -> Vec<Row> {
        let Some(panel) = self.view.panels.get(index).copied() else {
            return Vec::new();
        };
        self.view
            .rows
            .iter()
            .filter(|row| {
                let frame = self.view.tree.node(row.editor).and_then(|n| n.parent);
                let owner = frame.and_then(|f| self.view.tree.node(f)).and_then(|n| n.parent);
                owner == Some(panel)
            })
            .copied()
            .collect()
    }

    /// Editor node of the setting called `name`
    pub fn editor_for(&self, name: &str) -> Option<NodeId> {
        let index = self.descriptors.iter().position(|d| d.name == name)?;
        self.view.row(index).map(|row| row.editor)
    }

    /// Show panel `index`, committing any text being edited first.
    /// Selecting the panel already shown changes nothing.
    pub fn select_tree<H: SettingsHost + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
    ) -> Result<Vec<VisibilityEvent>, SessionError> {
        if self.visible_panel() == Some(index) {
            return Ok(Vec::new());
        }
        self.blur(host)?;
        Ok(self.view.controller.select(index, &mut self.view.tree))
    }

    /// Move keyboard focus to an editor
    pub fn focus<H: SettingsHost + ?Sized>(
        &mut self,
        host: &mut H,
        node: NodeId,
    ) -> Result<(), SessionError> {
        if self.focused == Some(node) {
            return Ok(());
        }
        if self.view.tree.editor(node).is_none() {
            return Ok(());
        }
        self.blur(host)?;
        if let Some(control) = self.view.tree.editor_mut(node) {
            control.set_focus(FocusState::Focused);
            self.focused = Some(node);
        }
        Ok(())
    }

    /// Focus the next (or previous) editor of the visible panel, wrapping
    pub fn cycle_focus<H: SettingsHost + ?Sized>(
        &mut self,
        host: &mut H,
        forward: bool,
    ) -> Result<(), SessionError> {
        let Some(panel) = self.visible_panel() else {
            return Ok(());
        };
        let editors: Vec<NodeId> = self.panel_rows(panel).iter().map(|r| r.editor).collect();
        if editors.is_empty() {
            return Ok(());
        }

        let position = self
            .focused
            .and_then(|f| editors.iter().position(|&e| e == f));
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => editors.len() - 1,
            (Some(i), true) => (i + 1) % editors.len(),
            (Some(i), false) => (i + editors.len() - 1) % editors.len(),
        };
        self.focus(host, editors[next])
    }

    /// Drop keyboard focus, committing buffered text
    pub fn blur<H: SettingsHost + ?Sized>(&mut self, host: &mut H) -> Result<(), SessionError> {
        let Some(node) = self.focused.take() else {
            return Ok(());
        };
        if let Some(control) = self.view.tree.editor_mut(node) {
            control.set_focus(FocusState::Normal);
        }
        self.edit(host, node, WidgetEdit::Blur)?;
        Ok(())
    }

    /// Apply an edit to an editor and write it back if it commits.
    ///
    /// Editors without a change handler (including every editor after
    /// teardown) ignore edits. A value that does not convert, or that the
    /// source refuses, is reported to the host and the editor is reset to
    /// the stored value.
    pub fn edit<H: SettingsHost + ?Sized>(
        &mut self,
        host: &mut H,
        node: NodeId,
        edit: WidgetEdit,
    ) -> Result<EditOutcome, SessionError> {
        let listening = self.view.tree.has_handler(node, Handler::ValueChanged)
            || self.view.tree.has_handler(node, Handler::FocusLost);
        let Some(index) = self.view.tree.tag(node).filter(|_| listening) else {
            return Ok(EditOutcome::Ignored);
        };
        let Some(control) = self.view.tree.editor_mut(node) else {
            return Ok(EditOutcome::Ignored);
        };

        match binding::apply(control, edit) {
            Intent::Commit(text) => self.commit(host, index, node, &text),
            Intent::Buffered => Ok(EditOutcome::Buffered),
            Intent::Ignored => Ok(EditOutcome::Ignored),
        }
    }

    /// Edit the setting called `name`
    pub fn edit_by_name<H: SettingsHost + ?Sized>(
        &mut self,
        host: &mut H,
        name: &str,
        edit: WidgetEdit,
    ) -> Result<EditOutcome, SessionError> {
        match self.editor_for(name) {
            Some(node) => self.edit(host, node, edit),
            None => {
                tracing::warn!("No editor for setting {}", name);
                Ok(EditOutcome::Ignored)
            }
        }
    }

    /// Route a key press to the focused editor
    pub fn handle_key<H: SettingsHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: KeyEvent,
    ) -> Result<EditOutcome, SessionError> {
        let Some(node) = self.focused else {
            return Ok(EditOutcome::Ignored);
        };
        let listening = self.view.tree.has_handler(node, Handler::ValueChanged)
            || self.view.tree.has_handler(node, Handler::FocusLost);
        let Some(index) = self.view.tree.tag(node).filter(|_| listening) else {
            return Ok(EditOutcome::Ignored);
        };
        let Some(control) = self.view.tree.editor_mut(node) else {
            return Ok(EditOutcome::Ignored);
        };

        // Escape in a text field drops the typed text and the focus
        let mut released = false;
        let intent = match control {
            EditorControl::Toggle(toggle) => match toggle.handle_key(key) {
                Some(ToggleEvent::Changed(checked)) => Intent::Commit(checked.to_string()),
                None => Intent::Ignored,
            },
            EditorControl::Spinner(spinner) => match spinner.handle_key(key) {
                Some(NumberInputEvent::Incremented(_) | NumberInputEvent::Decremented(_)) => {
                    Intent::Commit(spinner.canonical_text())
                }
                Some(NumberInputEvent::Submitted(text)) => Intent::Commit(text),
                Some(_) => Intent::Buffered,
                None => Intent::Ignored,
            },
            EditorControl::Dropdown(dropdown) => match dropdown.handle_key(key) {
                Some(DropdownEvent::Selected(_)) => Intent::Commit(
                    dropdown.selected_option().unwrap_or_default().to_string(),
                ),
                Some(_) => Intent::Buffered,
                None => Intent::Ignored,
            },
            EditorControl::Text(text) => match text.handle_key(key) {
                Some(TextInputEvent::Submitted(value)) => Intent::Commit(value),
                Some(TextInputEvent::Cancelled) => {
                    let stored = binding::stored_value(&self.source, &self.descriptors[index]);
                    text.set_value(stored.to_string());
                    text.focus = FocusState::Normal;
                    released = true;
                    Intent::Buffered
                }
                Some(_) => Intent::Buffered,
                None => Intent::Ignored,
            },
        };
        if released {
            self.focused = None;
        }

        match intent {
            Intent::Commit(text) => self.commit(host, index, node, &text),
            Intent::Buffered => Ok(EditOutcome::Buffered),
            Intent::Ignored => Ok(EditOutcome::Ignored),
        }
    }

    fn commit<H: SettingsHost + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
        node: NodeId,
        text: &str,
    ) -> Result<EditOutcome, SessionError> {
        let descriptor = &self.descriptors[index];
        let Some(control) = self.view.tree.editor_mut(node) else {
            return Ok(EditOutcome::Ignored);
        };

        let value = match binding::convert(descriptor, control, text) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Rejected value for {}: {}", descriptor.name, e);
                host.report_error(&e.to_string(), e.detail());
                control.sync_from(&binding::stored_value(&self.source, descriptor));
                return Ok(EditOutcome::Rejected(e));
            }
        };

        if let Err(e) = binding::write_back(&mut self.source, descriptor, value.clone()) {
            tracing::warn!("Failed to write {}: {}", descriptor.name, e);
            host.report_error(&format!("Could not change {}", descriptor.name), &e.to_string());
            control.sync_from(&binding::stored_value(&self.source, descriptor));
            return Ok(EditOutcome::WriteFailed(e));
        }

        control.sync_from(&value);
        if !self.dirty {
            tracing::debug!("First change, settings are now dirty");
        }
        self.dirty = true;
        tracing::debug!("Wrote {} = {}", descriptor.name, value);
        Ok(EditOutcome::Committed(value))
    }

    /// Tooltip for a label or editor whose setting has a description
    pub fn hover(&self, node: NodeId) -> Option<Tooltip> {
        if !self.view.tree.has_handler(node, Handler::Hover) {
            return None;
        }
        let index = self.view.tree.tag(node)?;
        let text = self.descriptors.get(index)?.description.clone()?;
        Some(Tooltip {
            text,
            duration: Duration::from_millis(self.options.tooltip_duration_ms),
        })
    }

    /// Persist the source and clear the dirty flag
    pub fn save(&mut self) -> Result<(), SessionError> {
        self.source.save()?;
        self.dirty = false;
        Ok(())
    }

    /// The editor is about to close: commit pending text and, if anything
    /// was written, offer to save
    pub fn on_closing<H: SettingsHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<CloseDecision, SessionError> {
        self.blur(host)?;
        if !self.dirty {
            return Ok(CloseDecision::Clean);
        }
        if host.confirm(SAVE_PROMPT) {
            self.save()?;
            host.notify("Settings saved");
            Ok(CloseDecision::Saved)
        } else {
            tracing::info!("Closing without saving changed settings");
            Ok(CloseDecision::Discarded)
        }
    }

    /// The editor closed: release every widget
    pub fn on_closed(&mut self) -> Vec<NodeId> {
        self.focused = None;
        self.view.tree.teardown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fonts::FixedFontCatalog;
    use crate::model::value::{SettingValue, ValueType};
    use crate::source::{JsonSettingsStore, PropertySpec, StoreValue};
    use crossterm::event::{KeyCode, KeyModifiers};

    #[derive(Default)]
    struct Host {
        answer: bool,
        questions: Vec<String>,
        errors: Vec<(String, String)>,
        notices: Vec<String>,
    }

    impl SettingsHost for Host {
        fn confirm(&mut self, question: &str) -> bool {
            self.questions.push(question.to_string());
            self.answer
        }

        fn report_error(&mut self, message: &str, detail: &str) {
            self.errors.push((message.to_string(), detail.to_string()));
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    fn session() -> SettingsSession<JsonSettingsStore> {
        let store = JsonSettingsStore::new(vec![
            PropertySpec::plain("Retries", ValueType::I32).with_default("3"),
            PropertySpec::plain("Verbose", ValueType::Bool),
            PropertySpec::plain("UserName", ValueType::Text),
        ]);
        SettingsSession::new(store, TreeViewOptions::default(), &FixedFontCatalog::default())
            .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_empty_source_is_fatal() {
        let store = JsonSettingsStore::new(Vec::new());
        let result =
            SettingsSession::new(store, TreeViewOptions::default(), &FixedFontCatalog::default());
        assert!(matches!(result, Err(SessionError::EmptySource)));
    }

    #[test]
    fn test_too_many_decimal_places_is_a_config_error() {
        let store = JsonSettingsStore::new(vec![PropertySpec::plain("Scale", ValueType::F64)]);
        let options = TreeViewOptions {
            floating_point_decimal_places: 20,
            ..TreeViewOptions::default()
        };
        let result = SettingsSession::new(store, options, &FixedFontCatalog::default());
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_commit_sets_dirty_and_save_clears_it() {
        let mut host = Host::default();
        let mut session = session();
        assert!(!session.is_dirty());

        let outcome = session
            .edit_by_name(&mut host, "Verbose", WidgetEdit::Toggle)
            .unwrap();
        assert_eq!(outcome, EditOutcome::Committed(SettingValue::Bool(true)));
        assert!(session.is_dirty());

        session.save().unwrap();
        assert!(!session.is_dirty());
        assert_eq!(session.source().save_count(), 1);
    }

    #[test]
    fn test_rejected_text_resyncs_editor() {
        let mut host = Host::default();
        let mut session = session();

        let outcome = session
            .edit_by_name(&mut host, "Retries", WidgetEdit::EnterNumber("lots".into()))
            .unwrap();
        assert!(matches!(outcome, EditOutcome::Rejected(_)));
        assert!(!session.is_dirty());
        assert_eq!(host.errors.len(), 1);

        let node = session.editor_for("Retries").unwrap();
        let shown = session.view().tree.editor(node).map(|c| c.native_text());
        assert_eq!(shown, Some("3".to_string()));
    }

    #[test]
    fn test_text_commits_when_focus_moves() {
        let mut host = Host::default();
        let mut session = session();
        let name = session.editor_for("UserName").unwrap();
        let retries = session.editor_for("Retries").unwrap();

        session.focus(&mut host, name).unwrap();
        for c in "ann".chars() {
            session.handle_key(&mut host, key(KeyCode::Char(c))).unwrap();
        }
        assert!(!session.is_dirty());

        session.focus(&mut host, retries).unwrap();
        assert!(session.is_dirty());
        assert_eq!(
            session.source().get("UserName"),
            Some(StoreValue::plain(SettingValue::Text("ann".into())))
        );
    }

    #[test]
    fn test_reselecting_visible_panel_keeps_text_buffered() {
        let mut host = Host::default();
        let mut session = session();
        let name = session.editor_for("UserName").unwrap();
        let shown = session.visible_panel().unwrap();

        session.focus(&mut host, name).unwrap();
        for c in "bob".chars() {
            session.handle_key(&mut host, key(KeyCode::Char(c))).unwrap();
        }

        assert!(session.select_tree(&mut host, shown).unwrap().is_empty());
        assert_eq!(session.focused(), Some(name));
        assert!(session.source().get("UserName").is_none());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_spinner_keys_commit_immediately() {
        let mut host = Host::default();
        let mut session = session();
        let retries = session.editor_for("Retries").unwrap();

        session.focus(&mut host, retries).unwrap();
        let outcome = session.handle_key(&mut host, key(KeyCode::Up)).unwrap();
        assert_eq!(outcome, EditOutcome::Committed(SettingValue::I32(4)));
    }

    #[test]
    fn test_closing_clean_session_does_not_prompt() {
        let mut host = Host::default();
        let mut session = session();
        assert_eq!(session.on_closing(&mut host).unwrap(), CloseDecision::Clean);
        assert!(host.questions.is_empty());
    }

    #[test]
    fn test_closing_dirty_session_prompts() {
        let mut host = Host {
            answer: false,
            ..Host::default()
        };
        let mut session = session();
        session
            .edit_by_name(&mut host, "Verbose", WidgetEdit::SetChecked(true))
            .unwrap();

        assert_eq!(session.on_closing(&mut host).unwrap(), CloseDecision::Discarded);
        assert_eq!(host.questions, vec![SAVE_PROMPT.to_string()]);
        assert_eq!(session.source().save_count(), 0);
    }

    #[test]
    fn test_edits_after_close_are_ignored() {
        let mut host = Host::default();
        let mut session = session();
        assert!(!session.on_closed().is_empty());

        let outcome = session
            .edit_by_name(&mut host, "Verbose", WidgetEdit::Toggle)
            .unwrap();
        assert_eq!(outcome, EditOutcome::Ignored);
        assert!(!session.is_dirty());
        assert!(session.on_closed().is_empty());
    }
}
