mod catalog;
mod log_collection;
mod persistence;
mod tracker;

pub use catalog::FoodCatalog;
pub use log_collection::LogCollection;
pub use persistence::{load_state, save_state, DietState};
pub use tracker::Tracker;
