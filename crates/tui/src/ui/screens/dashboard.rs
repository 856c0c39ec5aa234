use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, DashField, Feedback},
    ui::{
        components::{
            card::{Card, StatCard},
            progress::{goal_gauge, styled_amount},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    // Main layout: quick stats, form + breakdown, feedback line
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Quick stats
            Constraint::Min(12),   // Form and breakdown side by side
            Constraint::Length(1), // Feedback
        ])
        .split(area);

    render_quick_stats(frame, layout[0], state, &theme);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(layout[1]);

    render_form(frame, cols[0], state, &theme);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(5)])
        .split(cols[1]);

    render_breakdown(frame, right[0], state, &theme);
    render_progress(frame, right[1], state, &theme);

    render_feedback(frame, layout[2], state, &theme);
}

fn lenient(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

fn render_quick_stats(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let dashboard = &state.dashboard;
    let leftover = lenient(&dashboard.income) - lenient(&dashboard.expenses);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(area);

    let leftover_style = if leftover < 0.0 {
        Style::default().fg(theme.negative)
    } else {
        Style::default().fg(theme.positive)
    };
    StatCard::new("Leftover", format!("{leftover:.2}"), theme)
        .value_style(leftover_style)
        .render(frame, cols[0]);

    StatCard::new(
        "Current Savings",
        format!("{:.2}", lenient(&dashboard.current_savings)),
        theme,
    )
    .render(frame, cols[1]);

    StatCard::new("Method", dashboard.method.label(), theme)
        .value_style(Style::default().fg(theme.accent))
        .render(frame, cols[2]);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let dashboard = &state.dashboard;

    let card = Card::new("Monthly Info", theme).focused(true);

    let mut lines = Vec::new();
    for (field, value) in [
        (DashField::Income, &dashboard.income),
        (DashField::Expenses, &dashboard.expenses),
        (DashField::CurrentSavings, &dashboard.current_savings),
    ] {
        lines.push(input_line(field, value, dashboard.focus == field, theme));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Savings Goals",
        Style::default().fg(theme.text_muted),
    )));
    for (field, value) in [
        (DashField::GoalBooks, &dashboard.goal_books),
        (DashField::GoalTuition, &dashboard.goal_tuition),
        (DashField::GoalMeal, &dashboard.goal_meal),
    ] {
        lines.push(input_line(field, value, dashboard.focus == field, theme));
    }

    lines.push(Line::default());
    let method_focused = dashboard.focus == DashField::Method;
    let method_style = if method_focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:<17}", DashField::Method.label()),
            Style::default().fg(theme.dim),
        ),
        Span::styled(format!("‹ {} ›", dashboard.method.label()), method_style),
    ]));

    card.render_with(frame, area, Paragraph::new(lines));
}

fn input_line<'a>(
    field: DashField,
    value: &'a str,
    focused: bool,
    theme: &Theme,
) -> Line<'a> {
    let cursor = if focused { "│" } else { "" };
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    Line::from(vec![
        Span::styled(
            format!("{:<17}", field.label()),
            Style::default().fg(theme.dim),
        ),
        Span::styled(format!("{value}{cursor}"), style),
    ])
}

fn render_breakdown(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Savings Breakdown", theme);

    let Some(record) = &state.dashboard.saved else {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(
                "No savings calculated yet",
                Style::default().fg(theme.dim),
            )),
        );
        return;
    };

    let lines = vec![
        detail_line("Income", record.income, theme),
        detail_line("Expenses", record.expenses, theme),
        detail_line("Current Savings", record.current_savings, theme),
        Line::from(vec![
            Span::styled(format!("{:<17}", "Method"), Style::default().fg(theme.dim)),
            Span::styled(
                record.distribution_method.label(),
                Style::default().fg(theme.accent),
            ),
        ]),
        Line::default(),
        saved_line("Books saved", record.books_saved, theme),
        saved_line("Tuition saved", record.tuition_saved, theme),
        saved_line("Meal plan saved", record.meal_saved, theme),
    ];

    card.render_with(frame, area, Paragraph::new(lines));
}

fn detail_line(label: &str, amount: f64, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<17}"), Style::default().fg(theme.dim)),
        Span::styled(format!("{amount:.2}"), Style::default().fg(theme.text)),
    ])
}

fn saved_line(label: &str, amount: f64, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<17}"), Style::default().fg(theme.dim)),
        styled_amount(amount, theme),
    ])
}

fn render_progress(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Goal Progress", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let Some(record) = &state.dashboard.saved else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Progress appears after the first save",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    };

    let goals = state.dashboard.goal_values();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(goal_gauge("Books", record.books_saved, goals.books, theme), rows[0]);
    frame.render_widget(
        goal_gauge("Tuition", record.tuition_saved, goals.tuition, theme),
        rows[1],
    );
    frame.render_widget(goal_gauge("Meal plan", record.meal_saved, goals.meal, theme), rows[2]);
}

fn render_feedback(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(feedback) = &state.dashboard.feedback else {
        return;
    };
    let (message, color) = match feedback {
        Feedback::Success(message) => (message.as_str(), theme.positive),
        Feedback::Error(message) => (message.as_str(), theme.error),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(message, Style::default().fg(color))),
        area,
    );
}
