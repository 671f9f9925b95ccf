//! Toggle rendering functions

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{FocusState, ToggleColors, ToggleLayout, ToggleState};

/// Render a toggle, padding the label to `label_width` when given
pub fn render_toggle_aligned(
    frame: &mut Frame,
    area: Rect,
    state: &ToggleState,
    colors: &ToggleColors,
    label_width: Option<u16>,
) -> ToggleLayout {
    if area.height == 0 || area.width < 4 {
        return ToggleLayout::default();
    }

    let (bracket_color, check_color, label_color) = match state.focus {
        FocusState::Normal => (colors.bracket, colors.checkmark, colors.label),
        FocusState::Focused => (colors.focused, colors.checkmark, colors.focused),
    };

    let mark = if state.checked { "x" } else { " " };

    let actual_label_width = label_width.unwrap_or(state.label.len() as u16);
    let padded_label = format!(
        "{:width$}",
        state.label,
        width = actual_label_width as usize
    );

    let line = Line::from(vec![
        Span::styled(padded_label, Style::default().fg(label_color)),
        Span::styled(": ", Style::default().fg(label_color)),
        Span::styled("[", Style::default().fg(bracket_color)),
        Span::styled(mark, Style::default().fg(check_color)),
        Span::styled("]", Style::default().fg(bracket_color)),
    ]);

    frame.render_widget(Paragraph::new(line), area);

    let checkbox_start = area.x + actual_label_width + 2;
    let checkbox_width = 3u16.min((area.x + area.width).saturating_sub(checkbox_start));

    ToggleLayout {
        checkbox_area: Rect::new(checkbox_start, area.y, checkbox_width, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(state: &ToggleState, width: u16, label_width: Option<u16>) -> (String, ToggleLayout) {
        let mut terminal = Terminal::new(TestBackend::new(width, 1)).unwrap();
        let mut layout = ToggleLayout::default();
        terminal
            .draw(|frame| {
                layout = render_toggle_aligned(
                    frame,
                    Rect::new(0, 0, width, 1),
                    state,
                    &ToggleColors::default(),
                    label_width,
                );
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let row = (0..width).map(|x| buffer[(x, 0)].symbol()).collect();
        (row, layout)
    }

    #[test]
    fn test_aligned_label_pushes_checkbox() {
        let state = ToggleState::new(true, "Verbose");
        let (row, layout) = draw(&state, 30, Some(10));
        assert!(row.starts_with("Verbose   : [x]"));
        assert_eq!(layout.checkbox_area, Rect::new(12, 0, 3, 1));
    }

    #[test]
    fn test_narrow_area_draws_nothing() {
        let state = ToggleState::new(true, "Verbose");
        let (_, layout) = draw(&state, 3, None);
        assert_eq!(layout.checkbox_area, Rect::default());
    }
}
