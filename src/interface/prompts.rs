use dialoguer::{Confirm, Select};

use crate::error::Result;
use crate::models::{Food, MAX_RATING};

/// Prompt for a 0-10 rating; `None` if the user skips.
pub fn prompt_rating(food_name: &str) -> Result<Option<u8>> {
    let mut options: Vec<String> = (0..=MAX_RATING).map(|r| r.to_string()).collect();
    options.push("Skip".to_string());

    let selection = Select::new()
        .with_prompt(format!("How would you rate '{}'?", food_name))
        .items(&options)
        .default(options.len() - 1)
        .interact()?;

    Ok(u8::try_from(selection).ok().filter(|r| *r <= MAX_RATING))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Ask whether a fuzzy match is the food the user meant.
pub fn confirm_suggestion(input: &str, suggestion: &Food) -> Result<bool> {
    prompt_yes_no(
        &format!("No food named '{}'. Did you mean '{}'?", input, suggestion.name),
        true,
    )
}
