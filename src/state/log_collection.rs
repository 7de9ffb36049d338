use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use tracing::{debug, info};

use crate::error::{DietError, Result};
use crate::models::{DailyLog, Food, LogRecord};

/// All daily logs, keyed by date. Holds at most one log per date.
#[derive(Debug, Clone, Default)]
pub struct LogCollection {
    logs: BTreeMap<NaiveDate, DailyLog>,
}

impl LogCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_log_for_date(&self, date: NaiveDate) -> bool {
        self.logs.contains_key(&date)
    }

    pub fn get_log_by_date(&self, date: NaiveDate) -> Option<&DailyLog> {
        self.logs.get(&date)
    }

    /// The stored log for `date`, or a fresh empty one.
    pub fn log_or_empty(&self, date: NaiveDate) -> DailyLog {
        self.logs
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DailyLog::new(date))
    }

    /// Insert a log for a date that has none yet.
    pub fn add_log(&mut self, log: DailyLog) -> Result<()> {
        let date = log.date();
        if self.logs.contains_key(&date) {
            return Err(DietError::DuplicateLog(date));
        }
        self.logs.insert(date, log);
        Ok(())
    }

    /// Insert or replace the log for `log.date()`, returning the stored log.
    pub fn update_log(&mut self, log: DailyLog) -> &DailyLog {
        debug!(date = %log.date(), entries = log.len(), "log updated");
        match self.logs.entry(log.date()) {
            Entry::Occupied(mut slot) => {
                slot.insert(log);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(log),
        }
    }

    /// Drop the log for `date`, if there is one.
    pub fn remove_log(&mut self, date: NaiveDate) -> Option<DailyLog> {
        let removed = self.logs.remove(&date);
        if removed.is_some() {
            debug!(%date, "log removed");
        }
        removed
    }

    /// Point every log that references `old` at `new` instead.
    ///
    /// Returns how many logs were rewritten.
    pub fn update_food_across_logs(&mut self, old: &Food, new: &Food) -> usize {
        let mut touched = 0;
        for log in self.logs.values_mut() {
            if log.contains(old) {
                *log = log.replace_food(old, new);
                touched += 1;
            }
        }
        if touched > 0 {
            info!(old = %old.name, new = %new.name, logs = touched, "food migrated across logs");
        }
        touched
    }

    /// Logs dated within the `days` days ending on `end` (inclusive), oldest first.
    pub fn recent_logs(&self, end: NaiveDate, days: u32) -> Vec<&DailyLog> {
        if days == 0 {
            return Vec::new();
        }
        let start = end
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .unwrap_or(NaiveDate::MIN);
        self.logs.range(start..=end).map(|(_, log)| log).collect()
    }

    /// All logs, oldest first.
    pub fn logs(&self) -> impl Iterator<Item = &DailyLog> {
        self.logs.values()
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    pub fn to_records(&self) -> Vec<LogRecord> {
        self.logs.values().map(DailyLog::to_record).collect()
    }

    /// Rebuild from stored records. Two records for one date are corrupt
    /// state and fail with `DuplicateLog`.
    pub fn from_records(records: Vec<LogRecord>) -> Result<Self> {
        let mut collection = Self::new();
        for record in records {
            collection.add_log(DailyLog::from_record(record)?)?;
        }
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 5, d).unwrap()
    }

    fn apple() -> Food {
        Food::new("Apple", 100, 1, 25, 0)
    }

    #[test]
    fn test_missing_date_is_not_an_error() {
        let collection = LogCollection::new();
        assert!(!collection.has_log_for_date(day(1)));
        assert!(collection.get_log_by_date(day(1)).is_none());
        assert!(collection.log_or_empty(day(1)).is_empty());
    }

    #[test]
    fn test_add_log_rejects_duplicate_date() {
        let mut collection = LogCollection::new();
        collection.add_log(DailyLog::new(day(3))).unwrap();
        let err = collection.add_log(DailyLog::new(day(3))).unwrap_err();
        assert!(matches!(err, DietError::DuplicateLog(d) if d == day(3)));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_update_log_replaces() {
        let mut collection = LogCollection::new();
        collection.add_log(DailyLog::new(day(3))).unwrap();

        let eaten = collection.log_or_empty(day(3)).consume(&apple(), 2.0).unwrap();
        collection.update_log(eaten);

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get_log_by_date(day(3)).unwrap().portion(&apple()), 2.0);
    }

    #[test]
    fn test_update_log_hands_back_stored_log() {
        let mut collection = LogCollection::new();
        let log = DailyLog::new(day(8)).consume(&apple(), 1.5).unwrap();
        let stored = collection.update_log(log);
        assert_eq!(stored.portion(&apple()), 1.5);
    }

    #[test]
    fn test_remove_log() {
        let mut collection = LogCollection::new();
        collection.update_log(DailyLog::new(day(8)));
        assert!(collection.remove_log(day(8)).is_some());
        assert!(!collection.has_log_for_date(day(8)));
        assert!(collection.remove_log(day(8)).is_none());
    }

    #[test]
    fn test_update_food_across_logs() {
        let mut collection = LogCollection::new();
        for d in [1, 2] {
            let log = DailyLog::new(day(d))
                .consume(&apple(), f64::from(d))
                .unwrap()
                .add_rating(&apple(), 6)
                .unwrap();
            collection.update_log(log);
        }
        collection.update_log(DailyLog::new(day(3)));

        let edited = Food::new("Apple", 120, 1, 30, 0);
        assert_eq!(collection.update_food_across_logs(&apple(), &edited), 2);

        let log = collection.get_log_by_date(day(2)).unwrap();
        let (food, portion) = log.entries().next().unwrap();
        assert_eq!(food.calories, 120);
        assert_eq!(portion, 2.0);
        assert_eq!(log.ratings(&edited), &[6]);
    }

    #[test]
    fn test_recent_logs_window() {
        let mut collection = LogCollection::new();
        for d in [1, 5, 6, 7, 9] {
            collection.update_log(DailyLog::new(day(d)));
        }
        let dates: Vec<NaiveDate> = collection
            .recent_logs(day(7), 3)
            .into_iter()
            .map(DailyLog::date)
            .collect();
        assert_eq!(dates, vec![day(5), day(6), day(7)]);
        assert!(collection.recent_logs(day(7), 0).is_empty());
    }

    #[test]
    fn test_from_records_rejects_duplicate_dates() {
        let record = DailyLog::new(day(4)).consume(&apple(), 1.0).unwrap().to_record();
        let result = LogCollection::from_records(vec![record.clone(), record]);
        assert!(matches!(result, Err(DietError::DuplicateLog(_))));
    }
}
