use chrono::NaiveDate;
use serde::Serialize;

use crate::models::DailyLog;

/// Calories eaten on one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total_calories: f64,
}

/// Sum of `portion * calories` over every entry in the log.
pub fn total_calories(log: &DailyLog) -> f64 {
    log.entries()
        .map(|(food, portion)| portion * f64::from(food.calories))
        .sum()
}

/// One point per log, in the order given.
pub fn calorie_trend<'a, I>(logs: I) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a DailyLog>,
{
    logs.into_iter()
        .map(|log| TrendPoint {
            date: log.date(),
            total_calories: total_calories(log),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Food;

    #[test]
    fn test_trend_maps_each_log() {
        let apple = Food::new("Apple", 100, 1, 25, 0);
        let d1 = NaiveDate::from_ymd_opt(2020, 5, 26).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2020, 5, 27).unwrap();
        let logs = vec![
            DailyLog::new(d1).consume(&apple, 1.5).unwrap(),
            DailyLog::new(d2),
        ];

        let trend = calorie_trend(&logs);
        assert_eq!(
            trend,
            vec![
                TrendPoint {
                    date: d1,
                    total_calories: 150.0
                },
                TrendPoint {
                    date: d2,
                    total_calories: 0.0
                },
            ]
        );
    }
}
