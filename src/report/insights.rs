use crate::report::engine::{GoalVerdict, NutrientTotals, ReportLine};
use crate::report::trend::TrendPoint;

/// Narrative observations for a day that has a goal.
pub fn build_insights(
    lines: &[ReportLine],
    totals: &NutrientTotals,
    verdict: &GoalVerdict,
    target: u32,
    trend: &[TrendPoint],
) -> Vec<String> {
    let mut insights = vec![verdict.describe()];

    if let Some(top) = top_contributor(lines) {
        if totals.calories > 0.0 {
            let share = top.nutrients.calories / totals.calories * 100.0;
            insights.push(format!(
                "{} made up {:.0}% of the day's calories ({:.0} kcal).",
                top.food_name, share, top.nutrients.calories
            ));
        }
        if let GoalVerdict::Exceeded { excess, .. } = verdict {
            let per_portion = top.nutrients.calories / top.portion;
            if per_portion >= *excess {
                insights.push(format!(
                    "One portion less of {} would have kept you within your goal.",
                    top.food_name
                ));
            }
        }
    }

    if let Some((name, rating)) = favourite(lines) {
        insights.push(format!("Favourite of the day: {} ({:.1}/10).", name, rating));
    }

    if !trend.is_empty() {
        let on_target = trend
            .iter()
            .filter(|p| p.total_calories <= f64::from(target))
            .count();
        let average = trend.iter().map(|p| p.total_calories).sum::<f64>() / trend.len() as f64;
        insights.push(format!(
            "Within goal on {} of {} logged days, averaging {:.0} kcal.",
            on_target,
            trend.len(),
            average
        ));
    }

    insights
}

/// Line with the most calories; the earliest wins ties.
fn top_contributor(lines: &[ReportLine]) -> Option<&ReportLine> {
    lines.iter().fold(None::<&ReportLine>, |best, line| match best {
        Some(b) if b.nutrients.calories >= line.nutrients.calories => Some(b),
        _ => Some(line),
    })
}

/// Highest average rating among rated lines; the earliest wins ties.
fn favourite(lines: &[ReportLine]) -> Option<(&str, f64)> {
    lines
        .iter()
        .filter_map(|l| l.average_rating.map(|r| (l.food_name.as_str(), r)))
        .fold(None::<(&str, f64)>, |best, candidate| match best {
            Some(b) if b.1 >= candidate.1 => Some(b),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn line(name: &str, portion: f64, calories: f64, rating: Option<f64>) -> ReportLine {
        ReportLine {
            food_name: name.to_string(),
            portion,
            nutrients: NutrientTotals {
                calories,
                ..Default::default()
            },
            average_rating: rating,
        }
    }

    fn totals(calories: f64) -> NutrientTotals {
        NutrientTotals {
            calories,
            ..Default::default()
        }
    }

    #[test]
    fn test_verdict_comes_first() {
        let lines = vec![line("Apple", 2.0, 200.0, None)];
        let verdict = GoalVerdict::Achieved {
            target: 300,
            remaining: 100.0,
        };
        let insights = build_insights(&lines, &totals(200.0), &verdict, 300, &[]);
        assert_eq!(insights[0], "Goal achieved, 100 calories to spare.");
        assert_eq!(insights[1], "Apple made up 100% of the day's calories (200 kcal).");
        assert_eq!(insights.len(), 2);
    }

    #[test]
    fn test_one_portion_less_hint() {
        let lines = vec![
            line("Apple", 2.0, 200.0, None),
            line("Banana", 1.0, 90.0, None),
        ];
        let verdict = GoalVerdict::Exceeded {
            target: 250,
            excess: 40.0,
        };
        let insights = build_insights(&lines, &totals(290.0), &verdict, 250, &[]);
        assert!(insights
            .iter()
            .any(|i| i == "One portion less of Apple would have kept you within your goal."));
    }

    #[test]
    fn test_favourite_and_history() {
        let lines = vec![
            line("Apple", 1.0, 100.0, Some(6.0)),
            line("Banana", 1.0, 90.0, Some(8.5)),
        ];
        let verdict = GoalVerdict::Achieved {
            target: 200,
            remaining: 10.0,
        };
        let d = |day| NaiveDate::from_ymd_opt(2020, 5, day).unwrap();
        let trend = vec![
            TrendPoint {
                date: d(26),
                total_calories: 250.0,
            },
            TrendPoint {
                date: d(27),
                total_calories: 190.0,
            },
        ];
        let insights = build_insights(&lines, &totals(190.0), &verdict, 200, &trend);
        assert!(insights.contains(&"Favourite of the day: Banana (8.5/10).".to_string()));
        assert!(insights
            .contains(&"Within goal on 1 of 2 logged days, averaging 220 kcal.".to_string()));
    }
}
