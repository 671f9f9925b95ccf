//! Panel visibility
//!
//! Exactly one content panel is visible at a time. Selecting the visible
//! panel again, or a panel that does not exist, changes nothing.

use super::widgets::{NodeId, WidgetTree};

/// A visibility change made by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEvent {
    Hidden(usize),
    Shown(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationController {
    panels: Vec<NodeId>,
    current: Option<usize>,
}

impl NavigationController {
    /// Controller over panels that all start hidden
    pub fn new(panels: Vec<NodeId>) -> Self {
        Self {
            panels,
            current: None,
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn panel(&self, index: usize) -> Option<NodeId> {
        self.panels.get(index).copied()
    }

    /// Make panel `index` the visible one
    pub fn select(&mut self, index: usize, tree: &mut WidgetTree) -> Vec<VisibilityEvent> {
        if self.current == Some(index) {
            return Vec::new();
        }
        let Some(&panel) = self.panels.get(index) else {
            tracing::warn!(
                "Ignoring selection of panel {} of {}",
                index,
                self.panels.len()
            );
            return Vec::new();
        };

        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.current {
            tree.set_visible(self.panels[previous], false);
            events.push(VisibilityEvent::Hidden(previous));
        }
        tree.set_visible(panel, true);
        events.push(VisibilityEvent::Shown(index));
        self.current = Some(index);

        tracing::debug!("Showing panel {}", index);
        events
    }
}
