pub mod engine;
pub mod export;
pub mod insights;
pub mod trend;

pub use engine::{generate_report, GoalVerdict, NutrientTotals, Report, ReportLine};
pub use export::write_trend_csv;
pub use insights::build_insights;
pub use trend::{calorie_trend, total_calories, TrendPoint};
