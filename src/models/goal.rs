use serde::{Deserialize, Serialize};

use crate::error::{DietError, Result};

/// Lowest daily calorie target accepted.
pub const MINIMUM_ACCEPTABLE: u32 = 1;

/// Highest daily calorie target accepted.
pub const MAXIMUM_ACCEPTABLE: u32 = 99_999;

/// A daily calorie target, or the "no goal set" sentinel.
///
/// Serializes as an integer, or `null` when unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Option<u32>", into = "Option<u32>")]
pub struct Goal {
    target: Option<u32>,
}

impl Goal {
    pub fn new(target: u32) -> Result<Self> {
        if !(MINIMUM_ACCEPTABLE..=MAXIMUM_ACCEPTABLE).contains(&target) {
            return Err(DietError::GoalOutOfRange(target));
        }
        Ok(Self {
            target: Some(target),
        })
    }

    pub fn unset() -> Self {
        Self { target: None }
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn is_set(&self) -> bool {
        self.target.is_some()
    }
}

impl TryFrom<Option<u32>> for Goal {
    type Error = DietError;

    fn try_from(value: Option<u32>) -> Result<Self> {
        match value {
            Some(target) => Goal::new(target),
            None => Ok(Goal::unset()),
        }
    }
}

impl From<Goal> for Option<u32> {
    fn from(goal: Goal) -> Self {
        goal.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Goal::new(MINIMUM_ACCEPTABLE).is_ok());
        assert!(Goal::new(MAXIMUM_ACCEPTABLE).is_ok());
        assert!(matches!(Goal::new(0), Err(DietError::GoalOutOfRange(0))));
        assert!(Goal::new(MAXIMUM_ACCEPTABLE + 1).is_err());
    }

    #[test]
    fn test_unset_is_default() {
        assert_eq!(Goal::default(), Goal::unset());
        assert!(!Goal::unset().is_set());
        assert_eq!(Goal::new(2000).unwrap().target(), Some(2000));
    }

    #[test]
    fn test_serde_shape() {
        assert_eq!(serde_json::to_string(&Goal::new(1800).unwrap()).unwrap(), "1800");
        assert_eq!(serde_json::to_string(&Goal::unset()).unwrap(), "null");
        let goal: Goal = serde_json::from_str("2200").unwrap();
        assert_eq!(goal.target(), Some(2200));
        assert!(serde_json::from_str::<Goal>("0").is_err());
    }
}
