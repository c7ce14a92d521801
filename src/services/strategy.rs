use crate::models::{Phone, UsageCategory, UserPreference};

/// Maximum number of phones a strategy returns
pub const MAX_RESULTS: usize = 3;

/// Filtering/ranking policy applied to the catalog
///
/// Implementations must not mutate their input and return an empty list,
/// never an error, when nothing matches.
#[cfg_attr(test, mockall::automock)]
pub trait RecommendationStrategy: Send + Sync {
    /// Picks the best phones in `phones` for `pref`
    fn recommend(&self, phones: &[Phone], pref: &UserPreference) -> Vec<Phone>;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}

/// Strategy bound to a single usage category
///
/// Keeps phones tagged with the bound category whose price lies within the
/// budget and whose OS matches the preference, ranks them by sentiment
/// (highest first, ties keep catalog order) and returns the top
/// [`MAX_RESULTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageStrategy {
    category: UsageCategory,
}

impl UsageStrategy {
    pub const fn new(category: UsageCategory) -> Self {
        Self { category }
    }

    pub const fn casual() -> Self {
        Self::new(UsageCategory::Casual)
    }

    pub const fn entertainment() -> Self {
        Self::new(UsageCategory::Entertainment)
    }

    pub const fn gaming() -> Self {
        Self::new(UsageCategory::Gaming)
    }

    pub const fn photography() -> Self {
        Self::new(UsageCategory::Photography)
    }

    pub const fn productivity() -> Self {
        Self::new(UsageCategory::Productivity)
    }

    pub fn category(&self) -> UsageCategory {
        self.category
    }
}

impl From<UsageCategory> for UsageStrategy {
    fn from(category: UsageCategory) -> Self {
        Self::new(category)
    }
}

impl RecommendationStrategy for UsageStrategy {
    fn recommend(&self, phones: &[Phone], pref: &UserPreference) -> Vec<Phone> {
        let mut matches: Vec<Phone> = phones
            .iter()
            .filter(|p| p.is_for(self.category.as_str()))
            .filter(|p| p.in_budget(pref.min_budget, pref.max_budget))
            .filter(|p| pref.accepts_os(&p.os))
            .cloned()
            .collect();

        // sort_by is stable: equal sentiment keeps catalog order
        matches.sort_by(|a, b| b.sentiment.total_cmp(&a.sentiment));
        matches.truncate(MAX_RESULTS);
        matches
    }

    fn name(&self) -> &'static str {
        self.category.label()
    }
}
