use serde::{Deserialize, Deserializer, Serialize};

/// A registered food with per-portion nutritional values.
///
/// Two foods are the "same food" when their names match case-insensitively;
/// use [`Food::is_exact_duplicate`] to compare every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub name: String,

    #[serde(deserialize_with = "numeric_field")]
    pub calories: u32,

    #[serde(deserialize_with = "numeric_field")]
    pub protein: u32,

    #[serde(deserialize_with = "numeric_field")]
    pub carbs: u32,

    #[serde(deserialize_with = "numeric_field")]
    pub fats: u32,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Accepts either a JSON integer or an integer written as a string.
fn numeric_field<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("not a whole number: {:?}", s))),
    }
}

impl Food {
    pub fn new(
        name: impl Into<String>,
        calories: u32,
        protein: u32,
        carbs: u32,
        fats: u32,
    ) -> Self {
        Self {
            name: name.into(),
            calories,
            protein,
            carbs,
            fats,
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Whether this food answers to `name`, ignoring case.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Full-field equality, unlike `==` which only compares names.
    pub fn is_exact_duplicate(&self, other: &Food) -> bool {
        self.name == other.name
            && self.calories == other.calories
            && self.protein == other.protein
            && self.carbs == other.carbs
            && self.fats == other.fats
            && self.tags == other.tags
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{}: {} kcal, P:{}g C:{}g F:{}g",
            self.name, self.calories, self.protein, self.carbs, self.fats
        )
    }
}

impl PartialEq for Food {
    fn eq(&self, other: &Self) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl Eq for Food {}

impl std::hash::Hash for Food {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.to_lowercase().hash(state);
    }
}
