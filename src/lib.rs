pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod report;
pub mod state;

pub use error::{DietError, Result};
pub use models::{DailyLog, Food, Goal};
