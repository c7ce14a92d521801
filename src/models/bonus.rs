use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supplementary phone names per usage category
///
/// Keys are stored lowercase; names keep insertion order per key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusSuggestions {
    by_usage: HashMap<String, Vec<String>>,
}

impl BonusSuggestions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `name` to the suggestions for `usage`
    pub fn insert(&mut self, usage: &str, name: impl Into<String>) {
        self.by_usage
            .entry(usage.trim().to_lowercase())
            .or_default()
            .push(name.into());
    }

    /// Suggestions for `usage` (any case); empty when the category is unknown
    pub fn get(&self, usage: &str) -> &[String] {
        self.by_usage
            .get(&usage.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of categories with at least one suggestion
    pub fn len(&self) -> usize {
        self.by_usage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_usage.is_empty()
    }
}

impl From<HashMap<String, Vec<String>>> for BonusSuggestions {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        let mut bonus = Self::new();
        for (usage, names) in map {
            for name in names {
                bonus.insert(&usage, name);
            }
        }
        bonus
    }
}
