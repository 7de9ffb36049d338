pub mod prompts;
pub mod render;

pub use prompts::{confirm_suggestion, prompt_rating, prompt_yes_no};
pub use render::{display_food_list, display_log, display_report, display_trend};
