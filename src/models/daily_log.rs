use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DietError, Result};
use crate::models::Food;

/// Highest rating a user can give a food.
pub const MAX_RATING: u8 = 10;

/// Portions at or below this are treated as fully removed.
const PORTION_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
struct Entry {
    food: Food,
    portion: f64,
}

#[derive(Debug, Clone)]
struct Ratings {
    food: Food,
    values: Vec<u8>,
}

/// What was eaten on one calendar date.
///
/// A `DailyLog` is a value: every operation that changes it takes `&self` and
/// returns a new log, leaving the original untouched. Entries and ratings sit
/// behind `Arc`, so a new snapshot shares whichever half it did not change
/// with the one it was derived from.
#[derive(Debug, Clone)]
pub struct DailyLog {
    date: NaiveDate,
    entries: Arc<Vec<Entry>>,
    ratings: Arc<Vec<Ratings>>,
}

fn check_quantity(quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(DietError::InvalidPortion(quantity));
    }
    Ok(())
}

impl DailyLog {
    /// An empty log for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: Arc::new(Vec::new()),
            ratings: Arc::new(Vec::new()),
        }
    }

    /// An empty log for the local calendar date.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    fn position(&self, food: &Food) -> Option<usize> {
        self.entries.iter().position(|e| e.food == *food)
    }

    fn derive(&self, entries: Arc<Vec<Entry>>, ratings: Arc<Vec<Ratings>>) -> Self {
        Self {
            date: self.date,
            entries,
            ratings,
        }
    }

    /// Record `quantity` more of `food`.
    ///
    /// A zero quantity is accepted and leaves the contents unchanged.
    pub fn consume(&self, food: &Food, quantity: f64) -> Result<DailyLog> {
        check_quantity(quantity)?;

        let mut entries = (*self.entries).clone();
        match entries.iter_mut().find(|e| e.food == *food) {
            Some(entry) => entry.portion += quantity,
            None if quantity > 0.0 => entries.push(Entry {
                food: food.clone(),
                portion: quantity,
            }),
            None => {}
        }

        debug!(date = %self.date, food = %food.name, quantity, "consumed");
        Ok(self.derive(Arc::new(entries), Arc::clone(&self.ratings)))
    }

    /// Remove `quantity` of `food`, or the whole entry when `quantity` is `None`.
    ///
    /// Removing at least the logged portion drops the entry along with its
    /// ratings; portions never go negative.
    pub fn vomit(&self, food: &Food, quantity: Option<f64>) -> Result<DailyLog> {
        let pos = self
            .position(food)
            .ok_or_else(|| DietError::FoodNotLogged(food.name.clone()))?;
        if let Some(q) = quantity {
            check_quantity(q)?;
        }

        let mut entries = (*self.entries).clone();
        let remaining = quantity.map_or(0.0, |q| entries[pos].portion - q);

        if remaining > PORTION_EPSILON {
            entries[pos].portion = remaining;
            debug!(date = %self.date, food = %food.name, remaining, "portion reduced");
            return Ok(self.derive(Arc::new(entries), Arc::clone(&self.ratings)));
        }

        entries.remove(pos);
        let ratings: Vec<Ratings> = self
            .ratings
            .iter()
            .filter(|r| r.food != *food)
            .cloned()
            .collect();

        debug!(date = %self.date, food = %food.name, "entry removed");
        Ok(self.derive(Arc::new(entries), Arc::new(ratings)))
    }

    /// Portion of `food` eaten on this date; 0 if none.
    pub fn portion(&self, food: &Food) -> f64 {
        self.position(food)
            .map(|i| self.entries[i].portion)
            .unwrap_or(0.0)
    }

    /// Foods eaten on this date, in the order they were first logged.
    pub fn foods(&self) -> Vec<Food> {
        self.entries.iter().map(|e| e.food.clone()).collect()
    }

    /// `(food, portion)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&Food, f64)> {
        self.entries.iter().map(|e| (&e.food, e.portion))
    }

    pub fn contains(&self, food: &Food) -> bool {
        self.position(food).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a 0-10 rating for a food already logged on this date.
    pub fn add_rating(&self, food: &Food, rating: u8) -> Result<DailyLog> {
        if rating > MAX_RATING {
            return Err(DietError::InvalidRating(rating));
        }
        if !self.contains(food) {
            return Err(DietError::FoodNotLogged(food.name.clone()));
        }

        let mut ratings = (*self.ratings).clone();
        match ratings.iter_mut().find(|r| r.food == *food) {
            Some(r) => r.values.push(rating),
            None => ratings.push(Ratings {
                food: food.clone(),
                values: vec![rating],
            }),
        }

        debug!(date = %self.date, food = %food.name, rating, "rated");
        Ok(self.derive(Arc::clone(&self.entries), Arc::new(ratings)))
    }

    /// Ratings given to `food` on this date, oldest first.
    pub fn ratings(&self, food: &Food) -> &[u8] {
        self.ratings
            .iter()
            .find(|r| r.food == *food)
            .map(|r| r.values.as_slice())
            .unwrap_or(&[])
    }

    /// Mean rating for `food`, or `None` if it has not been rated yet.
    pub fn average_rating(&self, food: &Food) -> Option<f64> {
        let values = self.ratings(food);
        if values.is_empty() {
            return None;
        }
        let sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
        Some(f64::from(sum) / values.len() as f64)
    }

    /// Same contents, different date.
    pub fn with_date(&self, date: NaiveDate) -> DailyLog {
        Self {
            date,
            entries: Arc::clone(&self.entries),
            ratings: Arc::clone(&self.ratings),
        }
    }

    /// Re-key the entry for `old` to the `new` food value, keeping its
    /// position, portion and ratings.
    ///
    /// If `new` is renamed onto a food already logged, the two entries merge.
    pub fn replace_food(&self, old: &Food, new: &Food) -> DailyLog {
        let Some(pos) = self.position(old) else {
            return self.clone();
        };

        let mut entries = (*self.entries).clone();
        entries[pos].food = new.clone();
        if let Some(dup) = entries
            .iter()
            .enumerate()
            .position(|(i, e)| i != pos && e.food == *new)
        {
            let extra = entries[pos].portion;
            entries[dup].portion += extra;
            entries[dup].food = new.clone();
            entries.remove(pos);
        }

        let mut ratings: Vec<Ratings> = Vec::with_capacity(self.ratings.len());
        for r in self.ratings.iter() {
            let food = if r.food == *old { new } else { &r.food };
            match ratings.iter_mut().find(|existing| existing.food == *food) {
                Some(existing) => existing.values.extend_from_slice(&r.values),
                None => ratings.push(Ratings {
                    food: food.clone(),
                    values: r.values.clone(),
                }),
            }
        }

        self.derive(Arc::new(entries), Arc::new(ratings))
    }

    /// Stricter than `==`: also compares ratings and every food field.
    pub fn same_record(&self, other: &DailyLog) -> bool {
        if self != other || self.ratings.len() != other.ratings.len() {
            return false;
        }
        let foods_match = self.entries.iter().all(|e| {
            other
                .entries
                .iter()
                .any(|o| o.food.is_exact_duplicate(&e.food))
        });
        let ratings_match = self
            .ratings
            .iter()
            .all(|r| other.ratings(&r.food) == r.values.as_slice());
        foods_match && ratings_match
    }

    /// Persistence form of this log.
    pub fn to_record(&self) -> LogRecord {
        LogRecord {
            date: self.date,
            entries: self
                .entries
                .iter()
                .map(|e| PortionRecord {
                    food: e.food.clone(),
                    portion: e.portion,
                })
                .collect(),
            ratings: self
                .ratings
                .iter()
                .map(|r| RatingRecord {
                    food: r.food.clone(),
                    ratings: r.values.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild a log by replaying a stored record.
    pub fn from_record(record: LogRecord) -> Result<DailyLog> {
        let mut log = DailyLog::new(record.date);
        for entry in &record.entries {
            log = log.consume(&entry.food, entry.portion)?;
        }
        for rated in &record.ratings {
            for &rating in &rated.ratings {
                log = log.add_rating(&rated.food, rating)?;
            }
        }
        Ok(log)
    }
}

impl PartialEq for DailyLog {
    /// Same date and same `{food: portion}` mapping; ratings are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|e| other.contains(&e.food) && other.portion(&e.food) == e.portion)
    }
}

/// Serialized form of a [`DailyLog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub entries: Vec<PortionRecord>,
    #[serde(default)]
    pub ratings: Vec<RatingRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortionRecord {
    pub food: Food,
    pub portion: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRecord {
    pub food: Food,
    pub ratings: Vec<u8>,
}
