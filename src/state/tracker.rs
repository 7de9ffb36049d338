use chrono::NaiveDate;
use tracing::info;

use crate::error::{DietError, Result};
use crate::models::{DailyLog, Food, Goal};
use crate::report::{calorie_trend, generate_report, Report, TrendPoint};
use crate::state::catalog::FoodCatalog;
use crate::state::log_collection::LogCollection;
use crate::state::persistence::DietState;

/// Catalog, logs and goal together: what each command operates on.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    catalog: FoodCatalog,
    logs: LogCollection,
    goal: Goal,
}

impl Tracker {
    /// Rebuild from stored state, rejecting duplicate foods or dates.
    pub fn from_state(state: DietState) -> Result<Self> {
        Ok(Self {
            catalog: FoodCatalog::from_foods(state.foods)?,
            logs: LogCollection::from_records(state.logs)?,
            goal: state.goal,
        })
    }

    pub fn to_state(&self) -> DietState {
        DietState {
            foods: self.catalog.to_foods(),
            goal: self.goal,
            logs: self.logs.to_records(),
        }
    }

    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    pub fn logs(&self) -> &LogCollection {
        &self.logs
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn add_food(&mut self, food: Food) -> Result<()> {
        let description = food.debug_string();
        self.catalog.add(food)?;
        info!(food = %description, "food registered");
        Ok(())
    }

    /// Edit a catalog food and carry the change into every log that used it.
    ///
    /// Returns how many logs were migrated.
    pub fn edit_food(&mut self, name: &str, food: Food) -> Result<usize> {
        let old = self.catalog.edit(name, food.clone())?;
        Ok(self.logs.update_food_across_logs(&old, &food))
    }

    /// Drop a food from the catalog. Logs keep their own copy of it.
    pub fn remove_food(&mut self, name: &str) -> Result<Food> {
        self.catalog.remove(name)
    }

    pub fn set_goal(&mut self, calories: u32) -> Result<()> {
        self.goal = Goal::new(calories)?;
        info!(calories, "goal set");
        Ok(())
    }

    pub fn clear_goal(&mut self) {
        self.goal = Goal::unset();
    }

    /// Log `portion` of a catalog food on `date`, optionally with a rating.
    ///
    /// `None` means the day is still empty (a zero portion on a fresh day).
    pub fn eat(
        &mut self,
        date: NaiveDate,
        name: &str,
        portion: f64,
        rating: Option<u8>,
    ) -> Result<Option<&DailyLog>> {
        let food = self.catalog.lookup(name)?.clone();
        let mut log = self.logs.log_or_empty(date).consume(&food, portion)?;
        if let Some(rating) = rating {
            log = log.add_rating(&food, rating)?;
        }
        Ok(self.store(log))
    }

    /// Take back some or all of a food logged on `date`.
    ///
    /// The food is matched against the log itself, so foods since removed
    /// from the catalog can still be taken back. Taking back the last food
    /// drops the day entirely and returns `None`.
    pub fn vomit(
        &mut self,
        date: NaiveDate,
        name: &str,
        portion: Option<f64>,
    ) -> Result<Option<&DailyLog>> {
        let log = self.logged(date, name)?;
        let food = find_logged(log, name)?;
        let log = log.vomit(&food, portion)?;
        Ok(self.store(log))
    }

    /// Rate a food already logged on `date`.
    pub fn rate(&mut self, date: NaiveDate, name: &str, rating: u8) -> Result<&DailyLog> {
        let log = self.logged(date, name)?;
        let food = find_logged(log, name)?;
        let log = log.add_rating(&food, rating)?;
        Ok(self.logs.update_log(log))
    }

    /// Report for `date`, with the `history_days` days ending on it as trend.
    pub fn report(&self, date: NaiveDate, history_days: u32) -> Result<Report> {
        let log = self.logs.log_or_empty(date);
        let history = self.logs.recent_logs(date, history_days);
        generate_report(&log, &self.goal, &history)
    }

    pub fn trend(&self, end: NaiveDate, days: u32) -> Vec<TrendPoint> {
        calorie_trend(self.logs.recent_logs(end, days))
    }

    fn logged(&self, date: NaiveDate, name: &str) -> Result<&DailyLog> {
        self.logs
            .get_log_by_date(date)
            .ok_or_else(|| DietError::FoodNotLogged(name.to_string()))
    }

    /// Write back a non-empty log; an empty one removes its date.
    fn store(&mut self, log: DailyLog) -> Option<&DailyLog> {
        if log.is_empty() {
            self.logs.remove_log(log.date());
            return None;
        }
        Some(self.logs.update_log(log))
    }
}

fn find_logged(log: &DailyLog, name: &str) -> Result<Food> {
    log.entries()
        .map(|(food, _)| food)
        .find(|food| food.is_named(name))
        .cloned()
        .ok_or_else(|| DietError::FoodNotLogged(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 5, 27).unwrap()
    }

    fn sample_tracker() -> Tracker {
        let mut tracker = Tracker::default();
        tracker.add_food(Food::new("Apple", 100, 1, 25, 0)).unwrap();
        tracker.add_food(Food::new("Banana", 90, 1, 23, 0)).unwrap();
        tracker
    }

    #[test]
    fn test_eat_unknown_food() {
        let mut tracker = sample_tracker();
        let err = tracker.eat(day(), "Cherry", 1.0, None).unwrap_err();
        assert!(matches!(err, DietError::FoodNotFound(_)));
        assert!(tracker.logs().is_empty());
    }

    #[test]
    fn test_eat_accumulates_and_rates() {
        let mut tracker = sample_tracker();
        tracker.eat(day(), "apple", 1.0, Some(6)).unwrap();
        let log = tracker.eat(day(), "APPLE", 2.0, Some(8)).unwrap().unwrap();

        let apple = Food::new("Apple", 100, 1, 25, 0);
        assert_eq!(log.portion(&apple), 3.0);
        assert_eq!(log.average_rating(&apple), Some(7.0));
        assert_eq!(tracker.logs().len(), 1);
    }

    #[test]
    fn test_bad_rating_leaves_log_untouched() {
        let mut tracker = sample_tracker();
        assert!(tracker.eat(day(), "apple", 1.0, Some(42)).is_err());
        assert!(!tracker.logs().has_log_for_date(day()));
    }

    #[test]
    fn test_vomit_without_log() {
        let mut tracker = sample_tracker();
        assert!(matches!(
            tracker.vomit(day(), "apple", None),
            Err(DietError::FoodNotLogged(_))
        ));
    }

    #[test]
    fn test_vomit_after_catalog_removal() {
        let mut tracker = sample_tracker();
        tracker.eat(day(), "apple", 2.0, None).unwrap();
        tracker.remove_food("apple").unwrap();
        let log = tracker.vomit(day(), "apple", Some(1.0)).unwrap().unwrap();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_vomiting_last_food_drops_the_day() {
        let mut tracker = sample_tracker();
        tracker.add_food(Food::new("Pizza", 3000, 100, 300, 120)).unwrap();
        tracker.set_goal(500).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2020, 5, 26).unwrap();

        tracker.eat(yesterday, "pizza", 1.0, Some(10)).unwrap();
        assert!(tracker.vomit(yesterday, "pizza", None).unwrap().is_none());
        tracker.eat(day(), "apple", 1.0, None).unwrap();

        assert!(!tracker.logs().has_log_for_date(yesterday));
        assert!(tracker
            .to_state()
            .logs
            .iter()
            .all(|record| record.date != yesterday));

        let report = tracker.report(day(), 2).unwrap();
        assert_eq!(report.trend.len(), 1);
        assert!(report
            .insights
            .contains(&"Within goal on 1 of 1 logged days, averaging 100 kcal.".to_string()));
    }

    #[test]
    fn test_zero_portion_on_fresh_day_stores_nothing() {
        let mut tracker = sample_tracker();
        assert!(tracker.eat(day(), "apple", 0.0, None).unwrap().is_none());
        assert!(!tracker.logs().has_log_for_date(day()));
    }

    #[test]
    fn test_edit_food_migrates_logs() {
        let mut tracker = sample_tracker();
        tracker.eat(day(), "apple", 2.0, None).unwrap();
        let migrated = tracker
            .edit_food("apple", Food::new("Apple", 50, 1, 12, 0))
            .unwrap();
        assert_eq!(migrated, 1);

        let report = tracker.report(day(), 0).unwrap();
        assert_eq!(report.totals.calories, 100.0);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut tracker = sample_tracker();
        tracker.set_goal(1800).unwrap();
        tracker.eat(day(), "banana", 1.0, Some(9)).unwrap();

        let restored = Tracker::from_state(tracker.to_state()).unwrap();
        assert_eq!(restored.goal().target(), Some(1800));
        assert_eq!(restored.catalog().len(), 2);
        let before = tracker.logs().get_log_by_date(day()).unwrap();
        let after = restored.logs().get_log_by_date(day()).unwrap();
        assert!(before.same_record(after));
    }

    #[test]
    fn test_goal_out_of_range() {
        let mut tracker = sample_tracker();
        assert!(matches!(
            tracker.set_goal(0),
            Err(DietError::GoalOutOfRange(0))
        ));
        assert!(!tracker.goal().is_set());
    }
}
