use crate::models::{DailyLog, Food};
use crate::report::{GoalVerdict, Report, TrendPoint};

/// Width of the bar drawn for the largest value in a trend.
const TREND_BAR_WIDTH: usize = 40;

/// Display a report as a table followed by totals and insights.
pub fn display_report(report: &Report) {
    println!();
    println!("=== Report for {} ===", report.date);
    println!();

    let max_name_len = report
        .lines
        .iter()
        .map(|l| l.food_name.len())
        .max()
        .unwrap_or(10);

    for (i, line) in report.lines.iter().enumerate() {
        let rating = line
            .average_rating
            .map(|r| format!("  rated {:.1}/10", r))
            .unwrap_or_default();

        println!(
            "{:>3}. {:<width$} x{:<5} {:>6.0} kcal | P {:.1}g C {:.1}g F {:.1}g{}",
            i + 1,
            line.food_name,
            format_portion(line.portion),
            line.nutrients.calories,
            line.nutrients.protein,
            line.nutrients.carbs,
            line.nutrients.fats,
            rating,
            width = max_name_len
        );
    }

    println!();
    println!("--- Totals ---");
    println!("Calories: {:.0}", report.totals.calories);
    println!("Protein:  {:.1}g", report.totals.protein);
    println!("Carbs:    {:.1}g", report.totals.carbs);
    println!("Fats:     {:.1}g", report.totals.fats);
    println!();

    match report.verdict {
        GoalVerdict::NoGoal => println!("No goal exists. Set one with 'goal <calories>'."),
        GoalVerdict::Achieved { target, .. } | GoalVerdict::Exceeded { target, .. } => {
            println!("--- Goal: {} kcal ---", target);
            for insight in &report.insights {
                println!("  {}", insight);
            }
        }
    }

    if !report.trend.is_empty() {
        display_trend(&report.trend);
    }
    println!();
}

/// Display one day's log without any goal comparison.
pub fn display_log(log: &DailyLog) {
    if log.is_empty() {
        println!("Nothing logged on {}.", log.date());
        return;
    }

    println!();
    println!("=== {} ({} items) ===", log.date(), log.len());
    println!();

    for (food, portion) in log.entries() {
        let rating = log
            .average_rating(food)
            .map(|r| format!(", rated {:.1}/10", r))
            .unwrap_or_default();
        println!("  {} x{}{}", food.name, format_portion(portion), rating);
    }

    println!();
}

/// Display daily calorie totals as a horizontal bar chart.
pub fn display_trend(points: &[TrendPoint]) {
    if points.is_empty() {
        println!("No logs in range.");
        return;
    }

    let max = points
        .iter()
        .map(|p| p.total_calories)
        .fold(0.0_f64, f64::max);

    println!();
    println!("--- Calorie trend ---");
    for point in points {
        let width = if max > 0.0 {
            ((point.total_calories / max) * TREND_BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        println!(
            "  {} {:>6.0} {}",
            point.date,
            point.total_calories,
            "#".repeat(width)
        );
    }
}

/// Display a simple list of foods with their details.
pub fn display_food_list(foods: &[&Food], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        let tags = if food.tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", food.tags.join(", "))
        };
        println!(
            "  {} - {} kcal, P:{}g C:{}g F:{}g{}",
            food.name, food.calories, food.protein, food.carbs, food.fats, tags
        );
    }

    println!();
}

/// Whole portions print without decimals.
fn format_portion(portion: f64) -> String {
    if portion.fract() == 0.0 {
        format!("{:.0}", portion)
    } else {
        format!("{:.2}", portion)
    }
}
