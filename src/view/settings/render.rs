//! Settings view renderer
//!
//! Draws the navigation list on the left and the visible content panel on
//! the right: one titled section per group frame, one control per setting.

use super::session::SettingsSession;
use super::widgets::{EditorControl, NodeId, WidgetKind, WidgetTree};
use crate::source::SettingsSource;
use crate::view::controls::dropdown::{render_dropdown_aligned, DropdownColors};
use crate::view::controls::number_input::{render_number_input_aligned, NumberInputColors};
use crate::view::controls::text_input::{render_text_input_aligned, TextInputColors};
use crate::view::controls::toggle::{render_toggle_aligned, ToggleColors};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Width of the navigation list
const NAVIGATION_WIDTH: u16 = 24;

/// Width of free-text input fields
const TEXT_FIELD_WIDTH: u16 = 30;

/// Something under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsHit {
    Navigation(usize),
    Label(NodeId),
    Editor(NodeId),
}

/// Screen areas from the last render, for hit testing
#[derive(Debug, Clone, Default)]
pub struct SettingsLayout {
    pub navigation: Vec<(usize, Rect)>,
    /// Label part of each setting row
    pub labels: Vec<(NodeId, Rect)>,
    /// Control part of each setting row
    pub editors: Vec<(NodeId, Rect)>,
}

impl SettingsLayout {
    pub fn hit(&self, x: u16, y: u16) -> Option<SettingsHit> {
        let inside = |r: &Rect| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height;

        if let Some((index, _)) = self.navigation.iter().find(|(_, r)| inside(r)) {
            return Some(SettingsHit::Navigation(*index));
        }
        if let Some((node, _)) = self.editors.iter().find(|(_, r)| inside(r)) {
            return Some(SettingsHit::Editor(*node));
        }
        self.labels
            .iter()
            .find(|(_, r)| inside(r))
            .map(|(node, _)| SettingsHit::Label(*node))
    }
}

/// Render a settings session into `area`
pub fn render_settings<S: SettingsSource>(
    frame: &mut Frame,
    area: Rect,
    session: &SettingsSession<S>,
) -> SettingsLayout {
    let mut layout = SettingsLayout::default();

    frame.render_widget(Clear, area);
    let title = if session.is_dirty() {
        " Settings (modified) "
    } else {
        " Settings "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::horizontal([
        Constraint::Length(NAVIGATION_WIDTH),
        Constraint::Length(1),
        Constraint::Min(10),
    ])
    .split(inner);

    render_navigation(frame, chunks[0], session, &mut layout);
    render_separator(frame, chunks[1]);
    if let Some(panel) = session.visible_panel() {
        let content = Rect::new(
            chunks[2].x + 1,
            chunks[2].y,
            chunks[2].width.saturating_sub(1),
            chunks[2].height,
        );
        render_panel(frame, content, session, panel, &mut layout);
    }

    layout
}

fn render_navigation<S: SettingsSource>(
    frame: &mut Frame,
    area: Rect,
    session: &SettingsSession<S>,
    layout: &mut SettingsLayout,
) {
    let current = session.visible_panel();

    for (idx, text) in session.navigation_labels().into_iter().enumerate() {
        if idx as u16 >= area.height {
            break;
        }
        let row_area = Rect::new(area.x, area.y + idx as u16, area.width, 1);
        layout.navigation.push((idx, row_area));

        let style = if current == Some(idx) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let line = Line::from(Span::styled(format!(" {text}"), style));
        frame.render_widget(Paragraph::new(line), row_area);
    }
}

fn render_separator(frame: &mut Frame, area: Rect) {
    for y in 0..area.height {
        let cell = Rect::new(area.x, area.y + y, 1, 1);
        frame.render_widget(
            Paragraph::new("│").style(Style::default().fg(Color::DarkGray)),
            cell,
        );
    }
}

fn render_panel<S: SettingsSource>(
    frame: &mut Frame,
    area: Rect,
    session: &SettingsSession<S>,
    panel: usize,
    layout: &mut SettingsLayout,
) {
    let view = session.view();
    let Some(&panel_node) = view.panels.get(panel) else {
        return;
    };
    let tree = &view.tree;
    if !tree.is_visible(panel_node) {
        return;
    }

    let label_width = tree
        .post_order(panel_node)
        .into_iter()
        .filter_map(|id| tree.editor(id))
        .map(|control| control_label(control).len() as u16)
        .max();

    let bottom = area.y + area.height;
    let mut y = area.y;

    for &frame_node in tree.children(panel_node) {
        if y >= bottom {
            break;
        }
        if let Some(WidgetKind::GroupFrame { title }) = tree.node(frame_node).map(|n| &n.kind) {
            if !title.is_empty() {
                let style = Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD);
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(title.as_str(), style))),
                    Rect::new(area.x, y, area.width, 1),
                );
                y += 1;
            }
        }

        let mut pending_label = None;
        for &child in tree.children(frame_node) {
            if y >= bottom {
                break;
            }
            match tree.node(child).map(|n| &n.kind) {
                Some(WidgetKind::Label { .. }) => pending_label = Some(child),
                Some(WidgetKind::Editor(control)) => {
                    let height = control_height(control).min(bottom - y);
                    let row = Rect::new(area.x + 2, y, area.width.saturating_sub(2), height);
                    let (label_area, editor_area) = render_editor(frame, row, control, label_width);

                    if let Some(label) = pending_label.take() {
                        layout.labels.push((label, label_area));
                    }
                    layout.editors.push((child, editor_area));
                    y += height;
                }
                _ => {}
            }
        }

        y += 1; // gap between groups
    }

    render_tooltip_hint(frame, area, tree, layout);
}

/// Rows a control needs, including an open option list
fn control_height(control: &EditorControl) -> u16 {
    match control {
        EditorControl::Dropdown(dropdown) if dropdown.open => {
            1 + dropdown.options.len().min(dropdown.max_visible) as u16
        }
        _ => 1,
    }
}

fn control_label(control: &EditorControl) -> &str {
    match control {
        EditorControl::Toggle(state) => &state.label,
        EditorControl::Spinner(state) => &state.label,
        EditorControl::Dropdown(state) => &state.label,
        EditorControl::Text(state) => &state.label,
    }
}

/// Draw one control; returns its label and input areas
fn render_editor(
    frame: &mut Frame,
    area: Rect,
    control: &EditorControl,
    label_width: Option<u16>,
) -> (Rect, Rect) {
    let input = match control {
        EditorControl::Toggle(state) => {
            render_toggle_aligned(frame, area, state, &ToggleColors::default(), label_width)
                .checkbox_area
        }
        EditorControl::Spinner(state) => {
            render_number_input_aligned(
                frame,
                area,
                state,
                &NumberInputColors::default(),
                label_width,
            )
            .control_area
        }
        EditorControl::Dropdown(state) => {
            let dropdown = render_dropdown_aligned(
                frame,
                area,
                state,
                &DropdownColors::default(),
                label_width,
            );
            dropdown.button_area
        }
        EditorControl::Text(state) => {
            render_text_input_aligned(
                frame,
                area,
                state,
                &TextInputColors::default(),
                TEXT_FIELD_WIDTH,
                label_width,
            )
            .input_area
        }
    };

    let label = Rect::new(area.x, area.y, input.x.saturating_sub(area.x), 1);
    (label, input)
}

/// Mark editors that carry a description
fn render_tooltip_hint(frame: &mut Frame, area: Rect, tree: &WidgetTree, layout: &SettingsLayout) {
    use super::widgets::Handler;

    for (node, rect) in &layout.editors {
        if !tree.has_handler(*node, Handler::Hover) {
            continue;
        }
        let x = rect.x + rect.width + 1;
        if x < area.x + area.width {
            frame.render_widget(
                Paragraph::new("?").style(Style::default().fg(Color::DarkGray)),
                Rect::new(x, rect.y, 1, 1),
            );
        }
    }
}
