use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, AuthField, AuthTab, Feedback},
    ui::{components::tabs, theme::Theme},
};

/// Calculates a centered rect for the auth box
fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let box_width = 44;
    let box_height = 9;
    let card_area = centered_box(box_width, box_height, area);

    // Clear the area behind the form
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" salvadanaio ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    // Layout: tab bar plus the two input rows
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Login/Register tabs
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Username
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Password
        ])
        .margin(1)
        .split(inner);

    tabs::render_tabs(frame, rows[0], state.auth.tab, &theme);

    let form = match state.auth.tab {
        AuthTab::Login => &state.auth.login,
        AuthTab::Register => &state.auth.register,
    };

    let username_focused = state.auth.focus == AuthField::Username;
    render_input(
        frame,
        rows[2],
        "Username",
        &form.username,
        false,
        username_focused,
        &theme,
    );

    let password_focused = state.auth.focus == AuthField::Password;
    render_input(
        frame,
        rows[4],
        "Password",
        &form.password,
        true,
        password_focused,
        &theme,
    );

    // Feedback below the box (error or register confirmation)
    if let Some(feedback) = &state.auth.feedback {
        let (message, color) = match feedback {
            Feedback::Success(message) => (message.as_str(), theme.positive),
            Feedback::Error(message) => (message.as_str(), theme.error),
        };
        let feedback_area = Rect {
            x: card_area.x,
            y: card_area.y + card_area.height + 1,
            width: card_area.width,
            height: 1,
        };
        if feedback_area.y < area.y + area.height {
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(color)))
                    .alignment(Alignment::Center),
                feedback_area,
            );
        }
    }

    render_hints(frame, area, &theme);
}

/// Renders one labeled input row - value, cursor, masking for passwords
fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    is_password: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };

    let display = if is_password {
        format!("{}{}", mask_password(value), cursor)
    } else {
        format!("{value}{cursor}")
    };

    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    let line = Line::from(vec![
        Span::styled(format!(" {label:<10}"), Style::default().fg(theme.dim)),
        Span::styled(display, style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Masks password with bullets, one per character
fn mask_password(password: &str) -> String {
    if password.is_empty() {
        String::new()
    } else {
        "•".repeat(password.chars().count())
    }
}

fn render_hints(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let hints_area = Rect {
        x: area.x,
        y: area.y + area.height - 1,
        width: area.width,
        height: 1,
    };
    let hints = Line::from(vec![
        Span::styled("←/→", Style::default().fg(theme.accent)),
        Span::raw(" login/register  "),
        Span::styled("Tab", Style::default().fg(theme.accent)),
        Span::raw(" next field  "),
        Span::styled("Enter", Style::default().fg(theme.accent)),
        Span::raw(" submit  "),
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(
        Paragraph::new(hints).alignment(Alignment::Center),
        hints_area,
    );
}
