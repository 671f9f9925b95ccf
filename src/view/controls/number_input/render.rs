//! Number input rendering functions

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{FocusState, NumberInputColors, NumberInputLayout, NumberInputState};

/// Render a number input, padding the label to `label_width` when given
pub fn render_number_input_aligned(
    frame: &mut Frame,
    area: Rect,
    state: &NumberInputState,
    colors: &NumberInputColors,
    label_width: Option<u16>,
) -> NumberInputLayout {
    if area.height == 0 || area.width < 10 {
        return NumberInputLayout::default();
    }

    let (label_color, value_color, border_color, button_color) = match state.focus {
        FocusState::Normal => (colors.label, colors.value, colors.border, colors.button),
        FocusState::Focused => (colors.focused, colors.value, colors.focused, colors.focused),
    };

    let value_str = state.display_text();
    let inner_width = value_str.chars().count().max(5);
    // "[ value ]"
    let field_width = inner_width as u16 + 4;

    let actual_label_width = label_width.unwrap_or(state.label.len() as u16);
    let padded_label = format!(
        "{:width$}",
        state.label,
        width = actual_label_width as usize
    );

    let mut value_style = Style::default().fg(value_color);
    if state.editing() {
        value_style = value_style.add_modifier(Modifier::UNDERLINED);
    }

    let line = Line::from(vec![
        Span::styled(padded_label, Style::default().fg(label_color)),
        Span::styled(": ", Style::default().fg(label_color)),
        Span::styled("[", Style::default().fg(border_color)),
        Span::styled(
            format!(" {:^width$} ", value_str, width = inner_width),
            value_style,
        ),
        Span::styled("]", Style::default().fg(border_color)),
        Span::raw(" "),
        Span::styled("[-]", Style::default().fg(button_color)),
        Span::raw(" "),
        Span::styled("[+]", Style::default().fg(button_color)),
    ]);

    frame.render_widget(Paragraph::new(line), area);

    let value_start = area.x + actual_label_width + 2;
    // "[ value ] [-] [+]"
    let control_width = (field_width + 8).min((area.x + area.width).saturating_sub(value_start));

    NumberInputLayout {
        value_area: Rect::new(value_start, area.y, field_width, 1),
        control_area: Rect::new(value_start, area.y, control_width, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_renders_grouped_value_and_buttons() {
        let backend = TestBackend::new(40, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = NumberInputState::new("Size", 0, 100_000, 0).with_value(12_345);

        let mut layout = NumberInputLayout::default();
        terminal
            .draw(|frame| {
                layout = render_number_input_aligned(
                    frame,
                    Rect::new(0, 0, 40, 1),
                    &state,
                    &NumberInputColors::default(),
                    None,
                );
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol())
            .collect();
        assert!(row.starts_with("Size: [ 12,345 ] [-] [+]"));
        assert_eq!(layout.value_area, Rect::new(6, 0, 10, 1));
        assert_eq!(layout.control_area.width, 18);
    }
}
