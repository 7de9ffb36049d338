use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{DietError, Result};
use crate::models::Food;

/// Minimum Jaro-Winkler similarity for a name suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Registered foods, unique by case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    /// All foods keyed by lowercase name.
    foods: HashMap<String, Food>,
}

impl FoodCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting repeated names.
    pub fn from_foods(foods: Vec<Food>) -> Result<Self> {
        let mut catalog = Self::new();
        for food in foods {
            catalog.add(food)?;
        }
        Ok(catalog)
    }

    pub fn add(&mut self, food: Food) -> Result<()> {
        let key = food.key();
        if self.foods.contains_key(&key) {
            return Err(DietError::DuplicateFood(food.name));
        }
        self.foods.insert(key, food);
        Ok(())
    }

    /// Replace the food called `name` with `food`, returning the old value.
    pub fn edit(&mut self, name: &str, food: Food) -> Result<Food> {
        let old_key = name.to_lowercase();
        if !self.foods.contains_key(&old_key) {
            return Err(DietError::FoodNotFound(name.to_string()));
        }
        let new_key = food.key();
        if new_key != old_key && self.foods.contains_key(&new_key) {
            return Err(DietError::DuplicateFood(food.name));
        }

        let old = self
            .foods
            .remove(&old_key)
            .ok_or_else(|| DietError::FoodNotFound(name.to_string()))?;
        self.foods.insert(new_key, food);
        Ok(old)
    }

    pub fn remove(&mut self, name: &str) -> Result<Food> {
        self.foods
            .remove(&name.to_lowercase())
            .ok_or_else(|| DietError::FoodNotFound(name.to_string()))
    }

    /// Get a food by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Food> {
        self.foods.get(&name.to_lowercase())
    }

    /// Like [`get`](Self::get), but a missing name is an error.
    pub fn lookup(&self, name: &str) -> Result<&Food> {
        self.get(name)
            .ok_or_else(|| DietError::FoodNotFound(name.to_string()))
    }

    /// Closest registered name to `name`, if any is similar enough.
    pub fn suggest(&self, name: &str) -> Option<&Food> {
        let needle = name.to_lowercase();
        self.foods
            .iter()
            .map(|(key, food)| (food, jaro_winkler(key, &needle)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(food, _)| food)
    }

    /// All foods sorted by name.
    pub fn all(&self) -> Vec<&Food> {
        let mut foods: Vec<&Food> = self.foods.values().collect();
        foods.sort_by_key(|f| f.key());
        foods
    }

    /// Foods carrying `tag`, sorted by name.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Food> {
        self.all().into_iter().filter(|f| f.has_tag(tag)).collect()
    }

    /// Convert to a list of foods for JSON serialization.
    pub fn to_foods(&self) -> Vec<Food> {
        self.all().into_iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}
