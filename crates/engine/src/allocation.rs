//! Splitting the monthly leftover across the three goal categories.
//!
//! Everything in here is pure: the caller collects the form values, picks a
//! [`DistributionMethod`] and gets back the [`SavingsRecord`] that gets
//! persisted wholesale for the user.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Strategy used to split the leftover across the goal categories.
///
/// The serialized form is the literal label shown in the select control, so
/// data files stay readable and stable across UI reworks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionMethod {
    #[default]
    #[serde(rename = "Even Split")]
    EvenSplit,
    #[serde(rename = "Fixed Percentages")]
    FixedPercentages,
    #[serde(rename = "Proportional to Goal Size")]
    ProportionalToGoal,
}

impl DistributionMethod {
    pub const ALL: [DistributionMethod; 3] = [
        Self::EvenSplit,
        Self::FixedPercentages,
        Self::ProportionalToGoal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::EvenSplit => "Even Split",
            Self::FixedPercentages => "Fixed Percentages",
            Self::ProportionalToGoal => "Proportional to Goal Size",
        }
    }

    /// Next method in the select control, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::EvenSplit => Self::FixedPercentages,
            Self::FixedPercentages => Self::ProportionalToGoal,
            Self::ProportionalToGoal => Self::EvenSplit,
        }
    }

    /// Previous method in the select control, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::EvenSplit => Self::ProportionalToGoal,
            Self::FixedPercentages => Self::EvenSplit,
            Self::ProportionalToGoal => Self::FixedPercentages,
        }
    }
}

impl fmt::Display for DistributionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target amounts for the three goal categories.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Goals {
    pub books: f64,
    pub tuition: f64,
    pub meal: f64,
}

impl Goals {
    pub fn total(&self) -> f64 {
        self.books + self.tuition + self.meal
    }
}

/// One month of form input, as handed to [`allocate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanInput {
    pub income: f64,
    pub expenses: f64,
    pub current_savings: f64,
    pub goals: Goals,
    pub method: DistributionMethod,
}

impl PlanInput {
    /// Income minus expenses for the period. May be negative.
    pub fn leftover(&self) -> f64 {
        self.income - self.expenses
    }
}

/// The per-user record persisted in the store after a "Calculate & Save".
///
/// Echoes the inputs next to the computed split so the dashboard can render
/// the breakdown without re-reading the form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavingsRecord {
    pub income: f64,
    pub expenses: f64,
    pub current_savings: f64,
    pub books_saved: f64,
    pub tuition_saved: f64,
    pub meal_saved: f64,
    pub distribution_method: DistributionMethod,
}

/// Splits the leftover across books/tuition/meal according to the method.
///
/// Degenerate inputs are not an error: a zero goal total or a non-positive
/// leftover produces zeros (except `FixedPercentages`, which applies its
/// shares to a negative leftover as well — observed behavior, kept).
pub fn allocate(input: &PlanInput) -> SavingsRecord {
    let leftover = input.leftover();

    let (books, tuition, meal) = match input.method {
        DistributionMethod::EvenSplit => {
            if leftover > 0.0 {
                let share = leftover / 3.0;
                (share, share, share)
            } else {
                (0.0, 0.0, 0.0)
            }
        }
        DistributionMethod::FixedPercentages => {
            (leftover * 0.3, leftover * 0.5, leftover * 0.2)
        }
        DistributionMethod::ProportionalToGoal => {
            let total = input.goals.total();
            if total > 0.0 {
                (
                    (input.goals.books / total) * leftover,
                    (input.goals.tuition / total) * leftover,
                    (input.goals.meal / total) * leftover,
                )
            } else {
                (0.0, 0.0, 0.0)
            }
        }
    };

    SavingsRecord {
        income: input.income,
        expenses: input.expenses,
        current_savings: input.current_savings,
        books_saved: books,
        tuition_saved: tuition,
        meal_saved: meal,
        distribution_method: input.method,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(method: DistributionMethod) -> PlanInput {
        PlanInput {
            income: 1000.0,
            expenses: 400.0,
            current_savings: 50.0,
            goals: Goals {
                books: 100.0,
                tuition: 200.0,
                meal: 200.0,
            },
            method,
        }
    }

    #[test]
    fn even_split_divides_leftover_in_three() {
        let record = allocate(&input(DistributionMethod::EvenSplit));

        assert_eq!(record.books_saved, 200.0);
        assert_eq!(record.tuition_saved, 200.0);
        assert_eq!(record.meal_saved, 200.0);
    }

    #[test]
    fn even_split_zeroes_non_positive_leftover() {
        let mut plan = input(DistributionMethod::EvenSplit);
        plan.expenses = 1000.0;
        let record = allocate(&plan);
        assert_eq!(record.books_saved, 0.0);
        assert_eq!(record.tuition_saved, 0.0);
        assert_eq!(record.meal_saved, 0.0);

        plan.expenses = 1200.0;
        let record = allocate(&plan);
        assert_eq!(record.books_saved, 0.0);
        assert_eq!(record.tuition_saved, 0.0);
        assert_eq!(record.meal_saved, 0.0);
    }

    #[test]
    fn fixed_percentages_uses_30_50_20() {
        let record = allocate(&input(DistributionMethod::FixedPercentages));

        assert_eq!(record.books_saved, 180.0);
        assert_eq!(record.tuition_saved, 300.0);
        assert_eq!(record.meal_saved, 120.0);
    }

    #[test]
    fn fixed_percentages_applies_to_negative_leftover() {
        // Unlike EvenSplit, this strategy has no leftover guard.
        let mut plan = input(DistributionMethod::FixedPercentages);
        plan.income = 300.0;
        let record = allocate(&plan);

        assert_eq!(record.books_saved, -30.0);
        assert_eq!(record.tuition_saved, -50.0);
        assert_eq!(record.meal_saved, -20.0);
    }

    #[test]
    fn proportional_follows_goal_sizes() {
        let record = allocate(&input(DistributionMethod::ProportionalToGoal));

        assert_eq!(record.books_saved, 120.0);
        assert_eq!(record.tuition_saved, 240.0);
        assert_eq!(record.meal_saved, 240.0);
    }

    #[test]
    fn proportional_with_zero_goals_is_all_zero() {
        let mut plan = input(DistributionMethod::ProportionalToGoal);
        plan.goals = Goals::default();
        let record = allocate(&plan);

        assert_eq!(record.books_saved, 0.0);
        assert_eq!(record.tuition_saved, 0.0);
        assert_eq!(record.meal_saved, 0.0);
    }

    #[test]
    fn record_echoes_inputs() {
        let record = allocate(&input(DistributionMethod::EvenSplit));

        assert_eq!(record.income, 1000.0);
        assert_eq!(record.expenses, 400.0);
        assert_eq!(record.current_savings, 50.0);
        assert_eq!(record.distribution_method, DistributionMethod::EvenSplit);
    }

    #[test]
    fn method_serializes_to_select_labels() {
        for method in DistributionMethod::ALL {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.label()));
            let back: DistributionMethod = serde_json::from_str(&json).unwrap();
            assert_eq!(back, method);
        }
    }
}
