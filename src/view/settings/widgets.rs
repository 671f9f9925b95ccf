//! Widget arena
//!
//! Every widget generated for a session lives in one `WidgetTree`, addressed
//! by `NodeId`. Nodes record their parent and children, the descriptor they
//! were generated for, and the event handlers attached to them. Teardown is
//! a post-order walk over the arena, so it does not depend on widget kinds.

use crate::model::value::SettingValue;
use crate::view::controls::dropdown::DropdownState;
use crate::view::controls::FocusState;
use crate::view::controls::number_input::NumberInputState;
use crate::view::controls::text_input::TextInputState;
use crate::view::controls::toggle::ToggleState;

/// Index of a node in a `WidgetTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Event handlers a node can have attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Navigation node selection
    Select,
    /// Editor value change; commits immediately
    ValueChanged,
    /// Editor lost focus; commits buffered text
    FocusLost,
    /// Pointer over a label or editor; shows the description
    Hover,
    DrawColorItem,
    ColorSelectionChanged,
    DrawFontItem,
}

/// The control behind an editor node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorControl {
    Toggle(ToggleState),
    Spinner(NumberInputState),
    Dropdown(DropdownState),
    Text(TextInputState),
}

impl EditorControl {
    /// The control's native value as text, ready for type conversion
    pub fn native_text(&self) -> String {
        match self {
            EditorControl::Toggle(toggle) => toggle.checked.to_string(),
            EditorControl::Spinner(spinner) => spinner.canonical_text(),
            EditorControl::Dropdown(dropdown) => {
                dropdown.selected_option().unwrap_or_default().to_string()
            }
            EditorControl::Text(text) => text.value.clone(),
        }
    }

    /// Show `value` in the control
    pub fn sync_from(&mut self, value: &SettingValue) {
        match self {
            EditorControl::Toggle(toggle) => {
                if let SettingValue::Bool(checked) = value {
                    toggle.checked = *checked;
                }
            }
            EditorControl::Spinner(spinner) => {
                spinner.cancel_editing();
                if let Some(scaled) = value.to_scaled(spinner.decimal_places) {
                    spinner.set_value(scaled);
                }
            }
            EditorControl::Dropdown(dropdown) => {
                let name = value.to_string();
                let index = match dropdown.index_of(&name) {
                    Some(index) => Some(index),
                    // A font the catalog does not list is still a valid choice
                    None if dropdown.font_preview && !name.is_empty() => {
                        dropdown.options.push(name);
                        Some(dropdown.options.len() - 1)
                    }
                    None => None,
                };
                if let Some(index) = index {
                    dropdown.selected = index;
                    dropdown.ensure_visible();
                }
            }
            EditorControl::Text(text) => text.set_value(value.to_string()),
        }
    }

    pub fn focus(&self) -> FocusState {
        match self {
            EditorControl::Toggle(toggle) => toggle.focus,
            EditorControl::Spinner(spinner) => spinner.focus,
            EditorControl::Dropdown(dropdown) => dropdown.focus,
            EditorControl::Text(text) => text.focus,
        }
    }

    pub fn set_focus(&mut self, focus: FocusState) {
        match self {
            EditorControl::Toggle(toggle) => toggle.focus = focus,
            EditorControl::Spinner(spinner) => spinner.focus = focus,
            EditorControl::Dropdown(dropdown) => {
                if focus != FocusState::Focused {
                    dropdown.cancel();
                }
                dropdown.focus = focus;
            }
            EditorControl::Text(text) => text.focus = focus,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            EditorControl::Toggle(_) => "toggle",
            EditorControl::Spinner(_) => "spinner",
            EditorControl::Dropdown(_) => "dropdown",
            EditorControl::Text(_) => "text",
        }
    }
}

/// What a node is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    Root,
    NavigationNode { text: String },
    ContentPanel,
    GroupFrame { title: String },
    Label { text: String },
    Editor(EditorControl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetNode {
    pub kind: WidgetKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub visible: bool,
    /// Index of the descriptor this node was generated for
    pub tag: Option<usize>,
    pub handlers: Vec<Handler>,
    pub released: bool,
}

/// Arena of all widgets generated for one session
#[derive(Debug, Clone)]
pub struct WidgetTree {
    nodes: Vec<WidgetNode>,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![WidgetNode {
                kind: WidgetKind::Root,
                parent: None,
                children: Vec::new(),
                visible: true,
                tag: None,
                handlers: Vec::new(),
                released: false,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a visible child under `parent`
    pub fn add(&mut self, parent: NodeId, kind: WidgetKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(WidgetNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            visible: true,
            tag: None,
            handlers: Vec::new(),
            released: false,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&WidgetNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut WidgetNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn set_tag(&mut self, id: NodeId, tag: usize) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.tag = Some(tag);
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<usize> {
        self.node(id).and_then(|n| n.tag)
    }

    pub fn attach(&mut self, id: NodeId, handler: Handler) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            if !node.released {
                node.handlers.push(handler);
            }
        }
    }

    pub fn has_handler(&self, id: NodeId, handler: Handler) -> bool {
        self.node(id).is_some_and(|n| n.handlers.contains(&handler))
    }

    /// Number of handlers still attached anywhere in the tree
    pub fn attached_handlers(&self) -> usize {
        self.nodes.iter().map(|n| n.handlers.len()).sum()
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.visible = visible;
        }
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.visible)
    }

    pub fn editor(&self, id: NodeId) -> Option<&EditorControl> {
        match self.node(id).map(|n| &n.kind) {
            Some(WidgetKind::Editor(control)) => Some(control),
            _ => None,
        }
    }

    pub fn editor_mut(&mut self, id: NodeId) -> Option<&mut EditorControl> {
        match self.node_mut(id).map(|n| &mut n.kind) {
            Some(WidgetKind::Editor(control)) => Some(control),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    /// All nodes under `id`, children before parents
    pub fn post_order(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![(id, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                order.push(node);
                continue;
            }
            stack.push((node, true));
            for &child in self.children(node).iter().rev() {
                stack.push((child, false));
            }
        }
        order
    }

    /// Detach every handler and release every node, children first.
    ///
    /// Returns the nodes in the order they were released. Calling this again
    /// releases nothing.
    pub fn teardown(&mut self) -> Vec<NodeId> {
        let mut released = Vec::new();
        for id in self.post_order(self.root()) {
            let node = &mut self.nodes[id.0];
            if node.released {
                continue;
            }
            node.handlers.clear();
            node.visible = false;
            node.released = true;
            released.push(id);
        }
        tracing::debug!("Released {} widgets", released.len());
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tree() -> (WidgetTree, NodeId, NodeId, NodeId) {
        let mut tree = WidgetTree::new();
        let panel = tree.add(tree.root(), WidgetKind::ContentPanel);
        let frame = tree.add(
            panel,
            WidgetKind::GroupFrame {
                title: "Limits".to_string(),
            },
        );
        let editor = tree.add(
            frame,
            WidgetKind::Editor(EditorControl::Toggle(ToggleState::new(true, "Enable"))),
        );
        tree.attach(editor, Handler::ValueChanged);
        tree.attach(editor, Handler::Hover);
        (tree, panel, frame, editor)
    }

    #[test]
    fn test_add_links_parent_and_child() {
        let (tree, panel, frame, editor) = small_tree();
        assert_eq!(tree.children(panel), &[frame]);
        assert_eq!(tree.node(editor).and_then(|n| n.parent), Some(frame));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_post_order_visits_children_first() {
        let mut tree = WidgetTree::new();
        let a = tree.add(tree.root(), WidgetKind::ContentPanel);
        let a1 = tree.add(a, WidgetKind::Label { text: "a1".into() });
        let a2 = tree.add(a, WidgetKind::Label { text: "a2".into() });
        let b = tree.add(tree.root(), WidgetKind::ContentPanel);

        assert_eq!(tree.post_order(tree.root()), vec![a1, a2, a, b, tree.root()]);
    }

    #[test]
    fn test_teardown_detaches_everything_once() {
        let (mut tree, panel, frame, editor) = small_tree();
        assert_eq!(tree.attached_handlers(), 2);

        let order = tree.teardown();
        assert_eq!(order, vec![editor, frame, panel, tree.root()]);
        assert_eq!(tree.attached_handlers(), 0);
        assert!(tree.node(editor).is_some_and(|n| n.released));

        assert!(tree.teardown().is_empty());
        tree.attach(editor, Handler::ValueChanged);
        assert_eq!(tree.attached_handlers(), 0);
    }

    #[test]
    fn test_native_text_and_sync() {
        let mut spinner = EditorControl::Spinner(NumberInputState::new("Scale", -10, 10, 2));
        spinner.sync_from(&SettingValue::F64(1.5));
        assert_eq!(spinner.native_text(), "1.50");

        let mut dropdown = EditorControl::Dropdown(DropdownState::new(
            vec!["Low".to_string(), "High".to_string()],
            "Level",
        ));
        dropdown.sync_from(&SettingValue::Enum {
            type_name: "Level".to_string(),
            member: "High".to_string(),
        });
        assert_eq!(dropdown.native_text(), "High");
    }
}
