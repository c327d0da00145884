//! Reusable dashboard widgets.

use super::theme::{colors, Styles};
use crate::kpi::Breakdown;
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

/// Minimum terminal size the dashboard lays out in.
pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

/// Check if terminal meets minimum size requirements.
pub const fn check_terminal_size(width: u16, height: u16) -> Result<(), (u16, u16)> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        Err((MIN_WIDTH, MIN_HEIGHT))
    } else {
        Ok(())
    }
}

/// Render a "terminal too small" message.
pub fn render_size_warning(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled("Terminal too small", Style::default().fg(colors().warning).bold()),
        Line::from(""),
        Line::from(vec![
            Span::raw("Current: "),
            Span::styled(
                format!("{}x{}", area.width, area.height),
                Style::default().fg(colors().text),
            ),
        ]),
        Line::from(vec![
            Span::raw("Required: "),
            Span::styled(
                format!("{MIN_WIDTH}x{MIN_HEIGHT}"),
                Style::default().fg(colors().accent),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// One KPI tile: a bordered box with a label and a big value.
pub fn render_kpi_card(frame: &mut Frame, area: Rect, label: &str, value: &str, color: Color) {
    let card = Paragraph::new(Line::from(Span::styled(
        value.to_string(),
        Style::default().fg(color).bold(),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(format!(" {label} "), Styles::label()))
            .borders(Borders::ALL)
            .border_style(Styles::border()),
    );
    frame.render_widget(card, area);
}

/// Horizontal bar chart of a breakdown.
pub fn render_breakdown(frame: &mut Frame, area: Rect, breakdown: &Breakdown, focused: bool) {
    let scheme = colors();
    let palette = scheme.chart_palette();
    let label_width = area.width.saturating_sub(12).max(6) as usize / 2;

    let bars: Vec<Bar> = breakdown
        .entries
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::default()
                .value(*count as u64)
                .label(Line::from(crate::reports::truncate(label, label_width)))
                .style(Style::default().fg(palette[i % palette.len()]))
                .text_value(count.to_string())
        })
        .collect();

    let border = if focused {
        Styles::border_focused()
    } else {
        Styles::border()
    };
    let chart = BarChart::default()
        .block(
            Block::default()
                .title(format!(" {} ", breakdown.title))
                .borders(Borders::ALL)
                .border_style(border),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

/// Center a rect of `percent_x` by `percent_y` inside `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_terminal_size() {
        assert!(check_terminal_size(80, 24).is_ok());
        assert_eq!(check_terminal_size(79, 40), Err((80, 24)));
        assert!(check_terminal_size(120, 10).is_err());
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert!(inner.x >= outer.x && inner.y >= outer.y);
    }
}
