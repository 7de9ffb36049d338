use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::models::{Food, Goal, LogRecord};

/// Everything the tool stores on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DietState {
    #[serde(default)]
    pub foods: Vec<Food>,

    #[serde(default)]
    pub goal: Goal,

    #[serde(default)]
    pub logs: Vec<LogRecord>,
}

/// Load state from a JSON file. A missing file is an empty state.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<DietState> {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "no state file yet, starting empty");
        return Ok(DietState::default());
    }

    let content = fs::read_to_string(path)?;
    let state: DietState = serde_json::from_str(&content)?;
    info!(
        path = %path.display(),
        foods = state.foods.len(),
        logs = state.logs.len(),
        "state loaded"
    );
    Ok(state)
}

/// Save state to a JSON file.
pub fn save_state<P: AsRef<Path>>(path: P, state: &DietState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path.as_ref(), json)?;
    info!(path = %path.as_ref().display(), "state saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_and_save_roundtrip() {
        let json = r#"{
            "foods": [{"name": "Apple", "calories": "100", "protein": 1, "carbs": 25, "fats": 0, "tags": ["fruit"]}],
            "goal": 2000,
            "logs": [{
                "date": "2020-05-27",
                "entries": [{"food": {"name": "Apple", "calories": 100, "protein": 1, "carbs": 25, "fats": 0}, "portion": 2.0}],
                "ratings": [{"food": {"name": "Apple", "calories": 100, "protein": 1, "carbs": 25, "fats": 0}, "ratings": [7]}]
            }]
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let state = load_state(file.path()).unwrap();
        assert_eq!(state.foods.len(), 1);
        assert_eq!(state.foods[0].calories, 100);
        assert_eq!(state.goal.target(), Some(2000));
        assert_eq!(state.logs.len(), 1);
        assert_eq!(state.logs[0].ratings[0].ratings, vec![7]);

        let out_file = NamedTempFile::new().unwrap();
        save_state(out_file.path(), &state).unwrap();

        let reloaded = load_state(out_file.path()).unwrap();
        assert_eq!(reloaded.foods[0].name, "Apple");
        assert_eq!(reloaded.logs[0].entries[0].portion, 2.0);
    }

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_state(dir.path().join("absent.json")).unwrap();
        assert!(state.foods.is_empty());
        assert!(!state.goal.is_set());
        assert!(state.logs.is_empty());
    }

    #[test]
    fn test_missing_sections_default() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();
        let state = load_state(file.path()).unwrap();
        assert!(state.logs.is_empty());
    }
}
