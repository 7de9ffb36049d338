use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::{DietError, Result};
use crate::models::{DailyLog, Food, Goal};
use crate::report::insights::build_insights;
use crate::report::trend::{calorie_trend, TrendPoint};

/// Nutrient amounts, already scaled by portion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl NutrientTotals {
    /// Nutrients in `portion` servings of `food`.
    pub fn for_portion(food: &Food, portion: f64) -> Self {
        Self {
            calories: portion * f64::from(food.calories),
            protein: portion * f64::from(food.protein),
            carbs: portion * f64::from(food.carbs),
            fats: portion * f64::from(food.fats),
        }
    }

    pub fn add(&mut self, other: &NutrientTotals) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fats += other.fats;
    }
}

/// One food's contribution to a day.
#[derive(Debug, Clone, Serialize)]
pub struct ReportLine {
    pub food_name: String,
    pub portion: f64,
    pub nutrients: NutrientTotals,
    pub average_rating: Option<f64>,
}

/// How a day's calories compare with the goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GoalVerdict {
    NoGoal,
    Achieved { target: u32, remaining: f64 },
    Exceeded { target: u32, excess: f64 },
}

impl GoalVerdict {
    /// `target - total >= 0` counts as achieved, including exactly zero.
    pub fn evaluate(goal: &Goal, total_calories: f64) -> Self {
        let Some(target) = goal.target() else {
            return GoalVerdict::NoGoal;
        };
        let remaining = f64::from(target) - total_calories;
        if remaining >= 0.0 {
            GoalVerdict::Achieved { target, remaining }
        } else {
            GoalVerdict::Exceeded {
                target,
                excess: -remaining,
            }
        }
    }

    pub fn is_achieved(&self) -> bool {
        matches!(self, GoalVerdict::Achieved { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            GoalVerdict::NoGoal => "No goal set.".to_string(),
            GoalVerdict::Achieved { remaining, .. } => format!(
                "Goal achieved, {} calories to spare.",
                format_calories(tenths(*remaining, f64::floor))
            ),
            GoalVerdict::Exceeded { excess, .. } => format!(
                "Goal exceeded by {} calories.",
                format_calories(tenths(*excess, f64::ceil))
            ),
        }
    }
}

/// Round to tenths with `round`, after dropping float noise below 1e-6.
///
/// Excess rounds up so a real overrun never reads as zero.
fn tenths(value: f64, round: fn(f64) -> f64) -> f64 {
    let cleaned = (value * 1e6).round() / 1e6;
    round(cleaned * 10.0) / 10.0
}

/// Whole numbers print without decimals.
fn format_calories(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Aggregate view of a day against a goal.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub date: NaiveDate,
    pub lines: Vec<ReportLine>,
    pub totals: NutrientTotals,
    pub verdict: GoalVerdict,
    pub insights: Vec<String>,
    pub trend: Vec<TrendPoint>,
}

/// Build a report for `log`.
///
/// `history` feeds the calorie trend and the on-target count; pass an empty
/// slice for a single-day report. Neither input is modified. A log with no
/// entries is rejected with `EmptyLogReport`.
pub fn generate_report(log: &DailyLog, goal: &Goal, history: &[&DailyLog]) -> Result<Report> {
    if log.is_empty() {
        return Err(DietError::EmptyLogReport(log.date()));
    }

    let mut totals = NutrientTotals::default();
    let lines: Vec<ReportLine> = log
        .entries()
        .map(|(food, portion)| {
            let nutrients = NutrientTotals::for_portion(food, portion);
            totals.add(&nutrients);
            ReportLine {
                food_name: food.name.clone(),
                portion,
                nutrients,
                average_rating: log.average_rating(food),
            }
        })
        .collect();

    let verdict = GoalVerdict::evaluate(goal, totals.calories);
    let trend = calorie_trend(history.iter().copied());
    let insights = match goal.target() {
        Some(target) => build_insights(&lines, &totals, &verdict, target, &trend),
        None => Vec::new(),
    };

    debug!(date = %log.date(), total = totals.calories, ?verdict, "report generated");

    Ok(Report {
        date: log.date(),
        lines,
        totals,
        verdict,
        insights,
        trend,
    })
}
