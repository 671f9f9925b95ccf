//! Dropdown rendering functions

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{DropdownColors, DropdownLayout, DropdownState, FocusState};
use crate::model::color::{ContrastText, Swatch};

/// Widest option text shown before truncation
const MAX_DISPLAY_WIDTH: usize = 24;

/// Render a dropdown control with optional label width alignment.
///
/// When open, the option list is drawn in the rows below the button, as
/// many as fit in `area`.
pub fn render_dropdown_aligned(
    frame: &mut Frame,
    area: Rect,
    state: &DropdownState,
    colors: &DropdownColors,
    label_width: Option<u16>,
) -> DropdownLayout {
    if area.height == 0 || area.width < 10 {
        return DropdownLayout::default();
    }

    let (label_color, selected_color, border_color, arrow_color) = match state.focus {
        FocusState::Normal => (colors.label, colors.selected, colors.border, colors.arrow),
        FocusState::Focused => (
            colors.focused,
            colors.focused,
            colors.focused,
            colors.focused,
        ),
    };

    let selected_text = state.selected_option().unwrap_or("");
    let max_option_len = state.options.iter().map(|s| s.len()).max().unwrap_or(10);
    let display_width = max_option_len
        .max(selected_text.len())
        .min(MAX_DISPLAY_WIDTH);
    let padded = format!("{:width$}", selected_text, width = display_width);

    let arrow = if state.open { "▲" } else { "▼" };

    let actual_label_width = label_width.unwrap_or(state.label.len() as u16);
    let padded_label = format!(
        "{:width$}",
        state.label,
        width = actual_label_width as usize
    );

    let selected_style = option_style(
        state,
        state.selected_swatch(),
        Style::default().fg(selected_color),
    );

    let line = Line::from(vec![
        Span::styled(padded_label, Style::default().fg(label_color)),
        Span::styled(": ", Style::default().fg(label_color)),
        Span::styled("[", Style::default().fg(border_color)),
        Span::styled(padded, selected_style),
        Span::raw(" "),
        Span::styled(arrow, Style::default().fg(arrow_color)),
        Span::styled("]", Style::default().fg(border_color)),
    ]);

    frame.render_widget(Paragraph::new(line), area);

    let button_start = area.x + actual_label_width + 2;
    let button_width = display_width as u16 + 4;

    if state.open && area.height > 1 {
        let menu_y = area.y + 1;
        let available_height = area.height.saturating_sub(1) as usize;
        let options_to_show = state.options.len().min(available_height);
        let scroll_offset = state
            .scroll_offset
            .min(state.options.len().saturating_sub(options_to_show));

        for (i, option) in state
            .options
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(options_to_show)
        {
            let option_area = Rect::new(
                button_start,
                menu_y + (i - scroll_offset) as u16,
                button_width,
                1,
            );

            let base = if i == state.selected {
                Style::default().fg(colors.selected).bg(colors.highlight_bg)
            } else {
                Style::default().fg(colors.option).bg(Color::Reset)
            };
            let mut style = option_style(state, state.swatch(i), base);
            if i == state.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let padded_option = format!(" {:width$} ", option, width = display_width + 1);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(padded_option, style))),
                option_area,
            );
        }
    }

    DropdownLayout {
        button_area: Rect::new(button_start, area.y, button_width, 1),
    }
}

/// Style of one option: its swatch colors, or the font preview style
fn option_style(state: &DropdownState, swatch: Option<Swatch>, base: Style) -> Style {
    if let Some(swatch) = swatch {
        let (r, g, b) = swatch.rgb;
        let fg = match swatch.text {
            ContrastText::Black => Color::Black,
            ContrastText::White => Color::White,
        };
        return Style::default().fg(fg).bg(Color::Rgb(r, g, b));
    }
    if state.font_preview {
        return base.add_modifier(Modifier::ITALIC);
    }
    base
}
