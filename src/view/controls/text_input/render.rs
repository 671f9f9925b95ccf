//! Text input rendering functions

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{FocusState, TextInputColors, TextInputLayout, TextInputState};

/// Render a text input, padding the label to `label_width` when given.
///
/// `field_width` is the width of the text inside the brackets. When focused
/// the text scrolls so the cursor cell stays visible.
pub fn render_text_input_aligned(
    frame: &mut Frame,
    area: Rect,
    state: &TextInputState,
    colors: &TextInputColors,
    field_width: u16,
    label_width: Option<u16>,
) -> TextInputLayout {
    if area.height == 0 || area.width < 5 {
        return TextInputLayout::default();
    }

    let (label_color, text_color, border_color) = match state.focus {
        FocusState::Normal => (colors.label, colors.text, colors.border),
        FocusState::Focused => (colors.focused, colors.text, colors.focused),
    };

    let actual_label_width = label_width.unwrap_or(state.label.len() as u16);
    let final_label_width = actual_label_width + 2;
    let actual_field_width = field_width.min(area.width.saturating_sub(final_label_width + 2));
    let inner_width = actual_field_width as usize;

    // Scroll so the cursor stays inside the field
    let cursor_chars = state.value[..state.cursor.min(state.value.len())]
        .chars()
        .count();
    let scroll = cursor_chars.saturating_sub(inner_width.saturating_sub(1));

    let visible: String = state.value.chars().skip(scroll).take(inner_width).collect();
    let padded = format!("{:width$}", visible, width = inner_width);

    let padded_label = format!(
        "{:width$}",
        state.label,
        width = actual_label_width as usize
    );

    let line = Line::from(vec![
        Span::styled(padded_label, Style::default().fg(label_color)),
        Span::styled(": ", Style::default().fg(label_color)),
        Span::styled("[", Style::default().fg(border_color)),
        Span::styled(padded, Style::default().fg(text_color)),
        Span::styled("]", Style::default().fg(border_color)),
    ]);

    frame.render_widget(Paragraph::new(line), area);

    let input_start = area.x + final_label_width;
    let input_area = Rect::new(input_start, area.y, actual_field_width + 2, 1);

    if state.focus == FocusState::Focused && inner_width > 0 {
        let cursor_x = input_start + 1 + (cursor_chars - scroll) as u16;
        let cursor_char = state.value[state.cursor.min(state.value.len())..]
            .chars()
            .next()
            .unwrap_or(' ');
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                cursor_char.to_string(),
                Style::default()
                    .fg(colors.cursor)
                    .add_modifier(Modifier::REVERSED),
            ))),
            Rect::new(cursor_x, area.y, 1, 1),
        );
    }

    TextInputLayout { input_area }
}
