use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::AuthTab, ui::theme::Theme};

/// Renders the Login/Register tab pair of the auth screen.
pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, active: AuthTab, theme: &Theme) {
    let tabs = [AuthTab::Login, AuthTab::Register];

    let mut spans = Vec::new();
    spans.push(Span::raw(" ")); // Leading padding

    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  ")); // Gap between tabs
        }

        let label = tab.label();
        if *tab == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
