pub mod daily_log;
pub mod food;
pub mod goal;

pub use daily_log::{DailyLog, LogRecord, PortionRecord, RatingRecord, MAX_RATING};
pub use food::Food;
pub use goal::{Goal, MAXIMUM_ACCEPTABLE, MINIMUM_ACCEPTABLE};
