use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// diet_log — Log what you eat and see how each day measures up to your calorie goal.
#[derive(Parser, Debug)]
#[command(name = "diet_log")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the diet state JSON file.
    #[arg(short, long, default_value = "diet_state.json")]
    pub file: String,
}

/// Nutritional values of a food, per portion.
#[derive(Args, Debug)]
pub struct FoodArgs {
    /// Food name (case-insensitive, unique).
    pub name: String,

    /// Calories per portion.
    #[arg(long)]
    pub calories: u32,

    /// Protein grams per portion.
    #[arg(long, default_value = "0")]
    pub protein: u32,

    /// Carbohydrate grams per portion.
    #[arg(long, default_value = "0")]
    pub carbs: u32,

    /// Fat grams per portion.
    #[arg(long, default_value = "0")]
    pub fats: u32,

    /// Tags, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new food.
    AddFood(FoodArgs),

    /// Change a registered food; past logs pick up the new values.
    EditFood {
        /// Current name of the food.
        #[arg(long)]
        current: String,

        #[command(flatten)]
        food: FoodArgs,
    },

    /// Remove a food from the catalog.
    RemoveFood {
        name: String,
    },

    /// List registered foods.
    Foods {
        /// Only show foods with this tag.
        #[arg(long)]
        tag: Option<String>,
    },

    /// Log a portion of a food.
    Eat {
        food: String,

        /// Portions eaten.
        #[arg(short, long, default_value = "1")]
        portion: f64,

        /// Rating from 0 to 10.
        #[arg(short, long)]
        rating: Option<u8>,

        /// Ask for a rating interactively.
        #[arg(long, conflicts_with = "rating")]
        ask_rating: bool,

        /// Date to log on (YYYY-MM-DD), defaults to today.
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Take back some or all of a logged food.
    Vomit {
        food: String,

        /// Portions to remove; omit to remove the whole entry.
        #[arg(short, long)]
        portion: Option<f64>,

        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Rate a food already logged.
    Rate {
        food: String,

        /// Rating from 0 to 10; asked interactively when omitted.
        rating: Option<u8>,

        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Set or clear the daily calorie goal.
    Goal {
        /// Target calories per day.
        #[arg(required_unless_present = "clear")]
        calories: Option<u32>,

        /// Remove the current goal.
        #[arg(long, conflicts_with = "calories")]
        clear: bool,
    },

    /// Show what was logged on a date.
    Show {
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Report a day's totals against the goal.
    Report {
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Include this many days (ending on the date) as a trend.
        #[arg(long, default_value = "0")]
        history: u32,
    },

    /// Show daily calorie totals over a range of days.
    Trend {
        /// Last day of the range, defaults to today.
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Number of days in the range.
        #[arg(long, default_value = "7")]
        days: u32,

        /// Also write the series to this CSV file.
        #[arg(long)]
        csv: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Show { date: None }
    }
}
