use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use diet_log_rs::cli::{Cli, Command, FoodArgs};
use diet_log_rs::error::{DietError, Result};
use diet_log_rs::interface::{
    confirm_suggestion, display_food_list, display_log, display_report, display_trend,
    prompt_rating,
};
use diet_log_rs::models::Food;
use diet_log_rs::report::write_trend_csv;
use diet_log_rs::state::{load_state, save_state, Tracker};

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("diet_log_rs=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();
    let path = Path::new(&cli.file);

    let mut tracker = Tracker::from_state(load_state(path)?)?;

    let changed = match command {
        Command::AddFood(args) => cmd_add_food(&mut tracker, args)?,
        Command::EditFood { current, food } => cmd_edit_food(&mut tracker, &current, food)?,
        Command::RemoveFood { name } => {
            let removed = tracker.remove_food(&name)?;
            println!("Removed {}.", removed.name);
            true
        }
        Command::Foods { tag } => {
            let foods = match &tag {
                Some(tag) => tracker.catalog().find_by_tag(tag),
                None => tracker.catalog().all(),
            };
            display_food_list(&foods, "Foods");
            false
        }
        Command::Eat {
            food,
            portion,
            rating,
            ask_rating,
            date,
        } => cmd_eat(&mut tracker, &food, portion, rating, ask_rating, or_today(date))?,
        Command::Vomit {
            food,
            portion,
            date,
        } => {
            let date = or_today(date);
            match tracker.vomit(date, &food, portion)? {
                Some(log) => display_log(log),
                None => println!("Nothing left on {}.", date),
            }
            true
        }
        Command::Rate { food, rating, date } => {
            let rating = match rating {
                Some(r) => r,
                None => match prompt_rating(&food)? {
                    Some(r) => r,
                    None => return Ok(()),
                },
            };
            let log = tracker.rate(or_today(date), &food, rating)?;
            display_log(log);
            true
        }
        Command::Goal { calories, clear } => {
            match calories {
                Some(calories) if !clear => {
                    tracker.set_goal(calories)?;
                    println!("Daily goal set to {} kcal.", calories);
                }
                _ => {
                    tracker.clear_goal();
                    println!("Daily goal cleared.");
                }
            }
            true
        }
        Command::Show { date } => {
            display_log(&tracker.logs().log_or_empty(or_today(date)));
            false
        }
        Command::Report { date, history } => {
            let report = tracker.report(or_today(date), history)?;
            display_report(&report);
            false
        }
        Command::Trend { end, days, csv } => {
            let points = tracker.trend(or_today(end), days);
            display_trend(&points);
            if let Some(csv) = csv {
                write_trend_csv(&points, Path::new(&csv))?;
                println!("Wrote trend to {}", csv);
            }
            false
        }
    };

    if changed {
        save_state(path, &tracker.to_state())?;
    }

    Ok(())
}

fn or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

fn food_from_args(args: FoodArgs) -> Food {
    Food::new(args.name, args.calories, args.protein, args.carbs, args.fats).with_tags(args.tags)
}

fn cmd_add_food(tracker: &mut Tracker, args: FoodArgs) -> Result<bool> {
    let food = food_from_args(args);
    let name = food.name.clone();
    tracker.add_food(food)?;
    println!("Added {}.", name);
    Ok(true)
}

fn cmd_edit_food(tracker: &mut Tracker, current: &str, args: FoodArgs) -> Result<bool> {
    let food = food_from_args(args);
    let name = food.name.clone();
    let migrated = tracker.edit_food(current, food)?;
    println!("Updated {} ({} logs migrated).", name, migrated);
    Ok(true)
}

/// Resolve a typed name to a catalog name, offering the closest match.
fn resolve_food_name(tracker: &Tracker, input: &str) -> Result<Option<String>> {
    if tracker.catalog().get(input).is_some() {
        return Ok(Some(input.to_string()));
    }

    match tracker.catalog().suggest(input) {
        Some(suggestion) => {
            warn!(input, suggestion = %suggestion.name, "unknown food, offering closest match");
            if confirm_suggestion(input, suggestion)? {
                Ok(Some(suggestion.name.clone()))
            } else {
                Ok(None)
            }
        }
        None => Err(DietError::FoodNotFound(input.to_string())),
    }
}

fn cmd_eat(
    tracker: &mut Tracker,
    input: &str,
    portion: f64,
    rating: Option<u8>,
    ask_rating: bool,
    date: NaiveDate,
) -> Result<bool> {
    let Some(name) = resolve_food_name(tracker, input)? else {
        return Ok(false);
    };

    let rating = if ask_rating {
        prompt_rating(&name)?
    } else {
        rating
    };

    match tracker.eat(date, &name, portion, rating)? {
        Some(log) => display_log(log),
        None => println!("Nothing logged on {}.", date),
    }
    Ok(true)
}
