//! View compilation
//!
//! Turns ordered descriptors into the widget tree in one pass:
//!
//! ```text
//! root
//! └── navigation node (one per tree label)
//!     └── content panel
//!         └── group frame (one per group label)
//!             ├── label
//!             └── editor
//! ```
//!
//! Every label and editor is tagged with the index of its descriptor.

use super::classify::WidgetPlan;
use super::navigation::NavigationController;
use super::ordering::LabelFormatter;
use super::schema::SettingDescriptor;
use super::session::SessionError;
use super::widgets::{EditorControl, Handler, NodeId, WidgetKind, WidgetTree};
use crate::config::TreeViewOptions;
use crate::model::value::SettingValue;
use crate::view::controls::dropdown::DropdownState;
use crate::view::controls::number_input::NumberInputState;
use crate::view::controls::text_input::TextInputState;
use crate::view::controls::toggle::ToggleState;

/// Widgets generated for one descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub descriptor: usize,
    pub label: NodeId,
    pub editor: NodeId,
}

/// The compiled widget tree plus indexes into it
#[derive(Debug, Clone)]
pub struct CompiledView {
    pub tree: WidgetTree,
    /// Navigation nodes, one per distinct tree label, in display order
    pub navigation: Vec<NodeId>,
    /// Content panels, parallel to `navigation`
    pub panels: Vec<NodeId>,
    pub rows: Vec<Row>,
    pub controller: NavigationController,
}

impl CompiledView {
    /// Row generated for a descriptor
    pub fn row(&self, descriptor: usize) -> Option<&Row> {
        self.rows.iter().find(|r| r.descriptor == descriptor)
    }

    /// Row owning a label or editor node
    pub fn row_of_node(&self, node: NodeId) -> Option<&Row> {
        self.rows.iter().find(|r| r.label == node || r.editor == node)
    }

    /// Display text of every navigation node
    pub fn navigation_labels(&self) -> Vec<String> {
        self.navigation
            .iter()
            .filter_map(|&id| match self.tree.node(id).map(|n| &n.kind) {
                Some(WidgetKind::NavigationNode { text }) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Index of the visible panel
    pub fn visible_panel(&self) -> Option<usize> {
        self.controller.current()
    }
}

/// Build the widget tree for ordered descriptors and show the first panel
pub fn compile(
    descriptors: &[SettingDescriptor],
    options: &TreeViewOptions,
) -> Result<CompiledView, SessionError> {
    if descriptors.is_empty() {
        return Err(SessionError::EmptyInput);
    }

    let formatter = LabelFormatter::new(options);
    let mut tree = WidgetTree::new();
    let root = tree.root();

    let mut navigation = Vec::new();
    let mut panels = Vec::new();
    let mut rows = Vec::with_capacity(descriptors.len());

    let mut current_tree: Option<&str> = None;
    let mut current_group: Option<&str> = None;
    let mut panel = root;
    let mut frame = root;

    for (index, descriptor) in descriptors.iter().enumerate() {
        let Some((control, handlers)) = build_editor(descriptor, &formatter) else {
            tracing::warn!("No editor for {}, leaving it out", descriptor.name);
            continue;
        };

        if current_tree != Some(descriptor.tree_label.as_str()) {
            let node = tree.add(
                root,
                WidgetKind::NavigationNode {
                    text: formatter.tree_text(&descriptor.tree_label),
                },
            );
            tree.attach(node, Handler::Select);
            panel = tree.add(node, WidgetKind::ContentPanel);
            tree.set_visible(panel, false);

            navigation.push(node);
            panels.push(panel);
            current_tree = Some(descriptor.tree_label.as_str());
            current_group = None;
        }

        if current_group != Some(descriptor.group_label.as_str()) {
            frame = tree.add(
                panel,
                WidgetKind::GroupFrame {
                    title: formatter.group_text(&descriptor.group_label),
                },
            );
            current_group = Some(descriptor.group_label.as_str());
        }

        let label = tree.add(
            frame,
            WidgetKind::Label {
                text: formatter.label_text(&descriptor.name),
            },
        );
        tree.set_tag(label, index);

        let editor = tree.add(frame, WidgetKind::Editor(control));
        tree.set_tag(editor, index);
        for handler in handlers {
            tree.attach(editor, handler);
        }

        if descriptor.description.is_some() {
            tree.attach(label, Handler::Hover);
            tree.attach(editor, Handler::Hover);
        }

        rows.push(Row {
            descriptor: index,
            label,
            editor,
        });
    }

    if rows.is_empty() {
        return Err(SessionError::EmptyInput);
    }

    let mut controller = NavigationController::new(panels.clone());
    controller.select(0, &mut tree);

    tracing::debug!(
        "Compiled {} settings into {} panels ({} widgets)",
        rows.len(),
        panels.len(),
        tree.len()
    );

    Ok(CompiledView {
        tree,
        navigation,
        panels,
        rows,
        controller,
    })
}

/// Control and handlers for a descriptor's widget plan
fn build_editor(
    descriptor: &SettingDescriptor,
    formatter: &LabelFormatter<'_>,
) -> Option<(EditorControl, Vec<Handler>)> {
    let label = formatter.label_text(&descriptor.name);
    let value = &descriptor.value;

    let built = match &descriptor.plan {
        WidgetPlan::Toggle => {
            let checked = matches!(value, SettingValue::Bool(true));
            (
                EditorControl::Toggle(ToggleState::new(checked, label)),
                vec![Handler::ValueChanged],
            )
        }
        WidgetPlan::Spinner(plan) => {
            let mut spinner = NumberInputState::new(label, plan.min, plan.max, plan.decimal_places)
                .with_step(plan.step);
            let in_range = value
                .to_scaled(plan.decimal_places)
                .is_some_and(|scaled| spinner.set_value(scaled));
            if !in_range {
                // The store keeps its value until the user edits this spinner
                tracing::warn!(
                    "{} = {} is outside {}..={}, spinner shows {}",
                    descriptor.name,
                    value,
                    plan.min,
                    plan.max,
                    spinner.canonical_text()
                );
            }
            (EditorControl::Spinner(spinner), vec![Handler::ValueChanged])
        }
        WidgetPlan::EnumPicker {
            options,
            requires_color_swatch,
        } => {
            let mut dropdown = DropdownState::new(options.clone(), label);
            let mut handlers = vec![Handler::ValueChanged];
            if *requires_color_swatch {
                dropdown = dropdown.with_color_swatches();
                handlers.push(Handler::DrawColorItem);
                handlers.push(Handler::ColorSelectionChanged);
            }
            let selected = dropdown.index_of(&value.to_string()).unwrap_or_default();
            (
                EditorControl::Dropdown(dropdown.with_selected(selected)),
                handlers,
            )
        }
        WidgetPlan::FontPicker { options } => {
            let current = value.to_string();
            let mut options = options.clone();
            if !current.is_empty() && !options.iter().any(|o| o.eq_ignore_ascii_case(&current)) {
                options.push(current.clone());
            }
            let dropdown = DropdownState::new(options, label).with_font_preview();
            let selected = dropdown.index_of(&current).unwrap_or_default();
            (
                EditorControl::Dropdown(dropdown.with_selected(selected)),
                vec![Handler::ValueChanged, Handler::DrawFontItem],
            )
        }
        WidgetPlan::FreeText => (
            EditorControl::Text(TextInputState::new(label).with_value(value.to_string())),
            vec![Handler::FocusLost],
        ),
        WidgetPlan::Unsupported { .. } => return None,
    };
    Some(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::color::named_color_type;
    use crate::model::value::ValueType;
    use crate::view::settings::classify::SpinnerPlan;

    fn descriptor(
        name: &str,
        tree: &str,
        group: &str,
        sequence: u32,
        value: SettingValue,
        plan: WidgetPlan,
    ) -> SettingDescriptor {
        SettingDescriptor {
            name: name.to_string(),
            value_type: ValueType::Text,
            value,
            wrapped: false,
            tree_label: tree.to_string(),
            group_label: group.to_string(),
            description: None,
            sequence,
            plan,
        }
    }

    fn int_plan() -> WidgetPlan {
        WidgetPlan::Spinner(SpinnerPlan {
            min: i32::MIN as i128,
            max: i32::MAX as i128,
            step: 1,
            decimal_places: 0,
        })
    }

    fn sample() -> Vec<SettingDescriptor> {
        vec![
            descriptor("Theme", "Display", "Default", 2, SettingValue::Text("Dark".into()), WidgetPlan::FreeText),
            descriptor("Retries", "Network", "Limits", 0, SettingValue::I32(3), int_plan()),
            descriptor("Timeout", "Network", "Limits", 1, SettingValue::I32(30), int_plan()),
        ]
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let result = compile(&[], &TreeViewOptions::default());
        assert!(matches!(result, Err(SessionError::EmptyInput)));
    }

    #[test]
    fn test_one_panel_per_tree_and_first_visible() {
        let view = compile(&sample(), &TreeViewOptions::default()).unwrap();

        assert_eq!(view.navigation_labels(), vec!["Display", "Network"]);
        assert_eq!(view.panels.len(), 2);
        assert_eq!(view.visible_panel(), Some(0));
        assert!(view.tree.is_visible(view.panels[0]));
        assert!(!view.tree.is_visible(view.panels[1]));
    }

    #[test]
    fn test_rows_are_tagged_and_grouped() {
        let view = compile(&sample(), &TreeViewOptions::default()).unwrap();

        let network_frames = view.tree.children(view.panels[1]);
        assert_eq!(network_frames.len(), 1);
        let frame = view.tree.node(network_frames[0]).unwrap();
        assert!(matches!(&frame.kind, WidgetKind::GroupFrame { title } if title == "Limits"));
        // label + editor per setting
        assert_eq!(frame.children.len(), 4);

        for row in &view.rows {
            assert_eq!(view.tree.tag(row.label), Some(row.descriptor));
            assert_eq!(view.tree.tag(row.editor), Some(row.descriptor));
        }
    }

    #[test]
    fn test_font_picker_keeps_unlisted_current_font() {
        let plan = WidgetPlan::FontPicker {
            options: vec!["Arial".to_string()],
        };
        let d = descriptor("Font", "Display", "", 0, SettingValue::FontFamily("Fira Code".into()), plan);
        let view = compile(&[d], &TreeViewOptions::default()).unwrap();

        let editor = view.tree.editor(view.rows[0].editor).unwrap();
        match editor {
            EditorControl::Dropdown(dropdown) => {
                assert_eq!(dropdown.options, vec!["Arial", "Fira Code"]);
                assert_eq!(dropdown.selected_option(), Some("Fira Code"));
                assert!(dropdown.font_preview);
            }
            other => panic!("Expected dropdown, got {other:?}"),
        }
    }

    #[test]
    fn test_color_picker_gets_swatch_handlers() {
        let colors = named_color_type();
        let plan = WidgetPlan::EnumPicker {
            options: colors.members.clone(),
            requires_color_swatch: true,
        };
        let value = SettingValue::Enum {
            type_name: colors.name.clone(),
            member: "Red".to_string(),
        };
        let view = compile(&[descriptor("Accent", "Display", "", 0, value, plan)], &TreeViewOptions::default()).unwrap();

        let editor = view.rows[0].editor;
        assert!(view.tree.has_handler(editor, Handler::DrawColorItem));
        assert!(view.tree.has_handler(editor, Handler::ColorSelectionChanged));
        assert_eq!(view.tree.editor(editor).map(|e| e.native_text()), Some("Red".to_string()));
    }

    /// Collects formatted log output for assertions
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_out_of_range_stored_value_is_clamped_with_warning() {
        let plan = WidgetPlan::Spinner(SpinnerPlan {
            min: -127,
            max: 127,
            step: 1,
            decimal_places: 0,
        });
        let d = descriptor("Level", "Display", "", 0, SettingValue::I8(-128), plan);

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let view = tracing::subscriber::with_default(subscriber, || {
            compile(&[d], &TreeViewOptions::default()).unwrap()
        });

        let shown = view.tree.editor(view.rows[0].editor).map(|e| e.native_text());
        assert_eq!(shown, Some("-127".to_string()));
        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Level = -128 is outside -127..=127"));
    }

    #[test]
    fn test_free_text_commits_on_focus_loss_only() {
        let view = compile(&sample(), &TreeViewOptions::default()).unwrap();
        let theme = view.row(0).unwrap().editor;
        assert!(view.tree.has_handler(theme, Handler::FocusLost));
        assert!(!view.tree.has_handler(theme, Handler::ValueChanged));
    }
}
