use ratatui::{
    style::Style,
    text::Span,
    widgets::Gauge,
};

use crate::ui::theme::Theme;

/// Progress towards one goal, clamped to `[0, 1]`.
///
/// A zero goal is treated as a denominator of 1 so the bar renders instead
/// of dividing by zero. Display-level guard only.
#[must_use]
pub fn goal_ratio(saved: f64, goal: f64) -> f64 {
    let denominator = if goal > 0.0 { goal } else { 1.0 };
    let ratio = saved / denominator;
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}

/// Creates a labeled progress gauge for one goal category.
#[must_use]
pub fn goal_gauge(label: &str, saved: f64, goal: f64, theme: &Theme) -> Gauge<'static> {
    let ratio = goal_ratio(saved, goal);

    let gauge_color = if ratio >= 1.0 {
        theme.positive
    } else {
        theme.accent
    };

    Gauge::default()
        .gauge_style(Style::default().fg(gauge_color))
        .ratio(ratio)
        .label(format!("{label}  {saved:.2} / {goal:.2}"))
}

/// Creates a styled span for an amount with semantic coloring.
///
/// - Positive amounts: green with `+` prefix
/// - Negative amounts: red (no prefix, negative sign shown)
/// - Zero: neutral text color
#[must_use]
pub fn styled_amount(amount: f64, theme: &Theme) -> Span<'static> {
    let (color, prefix) = if amount > 0.0 {
        (theme.positive, "+")
    } else if amount < 0.0 {
        (theme.negative, "")
    } else {
        (theme.text, "")
    };

    Span::styled(format!("{prefix}{amount:.2}"), Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(goal_ratio(50.0, 100.0), 0.5);
        assert_eq!(goal_ratio(150.0, 100.0), 1.0);
        assert_eq!(goal_ratio(-20.0, 100.0), 0.0);
    }

    #[test]
    fn zero_goal_uses_denominator_one() {
        assert_eq!(goal_ratio(0.4, 0.0), 0.4);
        assert_eq!(goal_ratio(2.0, 0.0), 1.0);
    }
}
