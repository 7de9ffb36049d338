use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DietError {
    #[error("A log for {0} already exists")]
    DuplicateLog(NaiveDate),

    #[error("Food not logged: {0}")]
    FoodNotLogged(String),

    #[error("Nothing was logged on {0}, no report to generate")]
    EmptyLogReport(NaiveDate),

    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("Food already exists: {0}")]
    DuplicateFood(String),

    #[error("Invalid portion: {0}")]
    InvalidPortion(f64),

    #[error("Invalid rating: {0} (expected 0 to 10)")]
    InvalidRating(u8),

    #[error("Goal out of range: {0}")]
    GoalOutOfRange(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, DietError>;
