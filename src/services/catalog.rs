use serde::{Deserialize, Serialize};

use crate::models::{Phone, UserPreference};

use super::strategy::RecommendationStrategy;

/// How far above the maximum budget an additional recommendation may be priced
pub const ADDITIONAL_BUDGET_FACTOR: f64 = 1.15;

/// Position into a result list, handed back to callers between reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor(pub usize);

/// One slice of a paginated result
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor for the following read, `None` once the result is exhausted
    pub next: Option<Cursor>,
}

/// Returns up to `size` items of `items` starting at `cursor`
///
/// Cursors past the end yield an empty page; this never fails.
pub fn paginate<T: Clone>(items: &[T], cursor: Cursor, size: usize) -> Page<T> {
    let start = cursor.0.min(items.len());
    let end = start.saturating_add(size).min(items.len());
    let next = (end < items.len()).then_some(Cursor(end));

    Page {
        items: items[start..end].to_vec(),
        next,
    }
}

/// Phone library: the full in-memory record set, plus the most recent
/// strategy result and a batch cursor over it
///
/// The cursor state belongs to one session. Shared servers should use the
/// stateless [`paginate`] instead of [`Catalog::next_batch`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    phones: Vec<Phone>,
    current_recommendation: Vec<Phone>,
    batch_pointer: usize,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `phones` in the given order
    pub fn with_phones(phones: Vec<Phone>) -> Self {
        Self {
            phones,
            ..Self::default()
        }
    }

    /// Read-only view of every record
    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    /// Owned copy of every record; changes to it never reach the catalog
    pub fn all_phones(&self) -> Vec<Phone> {
        self.phones.clone()
    }

    pub fn len(&self) -> usize {
        self.phones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }

    /// Appends a record
    pub fn add_phone(&mut self, phone: Phone) {
        self.phones.push(phone);
    }

    /// Replaces the current recommendation with `strategy`'s pick and rewinds
    /// the batch cursor
    pub fn filter_with_strategy(
        &mut self,
        pref: &UserPreference,
        strategy: &dyn RecommendationStrategy,
    ) {
        self.current_recommendation = strategy.recommend(&self.phones, pref);
        self.batch_pointer = 0;

        tracing::debug!(
            strategy = strategy.name(),
            matches = self.current_recommendation.len(),
            "Recommendation filtered"
        );
    }

    /// Current recommendation produced by the last [`Catalog::filter_with_strategy`]
    pub fn current_recommendation(&self) -> &[Phone] {
        &self.current_recommendation
    }

    /// Returns up to `batch_size` records from the current recommendation and
    /// advances the cursor past them
    pub fn next_batch(&mut self, batch_size: usize) -> Vec<Phone> {
        let page = paginate(
            &self.current_recommendation,
            Cursor(self.batch_pointer),
            batch_size,
        );
        self.batch_pointer += page.items.len();
        page.items
    }

    /// Whether the current recommendation still has unread records
    pub fn has_next_batch(&self) -> bool {
        self.batch_pointer < self.current_recommendation.len()
    }

    /// Phones priced slightly above the budget: `max < price <= max * 1.15`
    ///
    /// When none exist, falls back to `strategy`'s regular recommendation so the
    /// caller always has something to offer.
    pub fn additional_recommendation(
        &self,
        pref: &UserPreference,
        strategy: &dyn RecommendationStrategy,
    ) -> Vec<Phone> {
        let max = pref.max_budget;
        let upper = max * ADDITIONAL_BUDGET_FACTOR;

        let extra: Vec<Phone> = self
            .phones
            .iter()
            .filter(|p| p.price > max && p.price <= upper)
            .cloned()
            .collect();

        if extra.is_empty() {
            tracing::debug!(
                max_budget = max,
                strategy = strategy.name(),
                "No phones slightly above budget, falling back to strategy"
            );
            return strategy.recommend(&self.phones, pref);
        }

        extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NO_PREFERENCE;
    use crate::services::strategy::{MockRecommendationStrategy, UsageStrategy};
    use proptest::prelude::*;

    fn phone(name: &str, price: f64, usage: &str, sentiment: f64) -> Phone {
        Phone::new(name, "Brand", price, "Android", usage, "", vec![], sentiment, 0)
    }

    fn catalog() -> Catalog {
        Catalog::with_phones(vec![
            phone("Budget", 300.0, "casual", 70.0),
            phone("Mid", 650.0, "casual", 82.0),
            phone("Flagship", 999.0, "casual", 90.0),
            phone("Stretch", 1099.0, "gaming", 88.0),
            phone("Ultra", 1500.0, "gaming", 95.0),
        ])
    }

    #[test]
    fn test_all_phones_is_a_copy() {
        let catalog = catalog();
        let mut copy = catalog.all_phones();
        copy.clear();
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_add_phone_appends() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        catalog.add_phone(phone("One", 1.0, "casual", 1.0));
        catalog.add_phone(phone("Two", 2.0, "casual", 2.0));
        let names: Vec<_> = catalog.phones().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["One", "Two"]);
    }

    #[test]
    fn test_batches_two_then_one() {
        let mut catalog = catalog();
        let pref = UserPreference::new("casual", 0.0, 1000.0, NO_PREFERENCE);
        catalog.filter_with_strategy(&pref, &UsageStrategy::casual());
        assert_eq!(catalog.current_recommendation().len(), 3);

        let first = catalog.next_batch(2);
        assert_eq!(first.len(), 2);
        assert!(catalog.has_next_batch());

        let second = catalog.next_batch(2);
        assert_eq!(second.len(), 1);
        assert!(!catalog.has_next_batch());

        assert!(catalog.next_batch(2).is_empty());
    }

    #[test]
    fn test_filter_resets_cursor() {
        let mut catalog = catalog();
        let pref = UserPreference::new("casual", 0.0, 1000.0, NO_PREFERENCE);
        catalog.filter_with_strategy(&pref, &UsageStrategy::casual());
        catalog.next_batch(3);
        assert!(!catalog.has_next_batch());

        catalog.filter_with_strategy(&pref, &UsageStrategy::casual());
        assert!(catalog.has_next_batch());
        assert_eq!(catalog.next_batch(1)[0].name, "Flagship");
    }

    #[test]
    fn test_zero_batch_size_does_not_advance() {
        let mut catalog = catalog();
        let pref = UserPreference::new("casual", 0.0, 1000.0, NO_PREFERENCE);
        catalog.filter_with_strategy(&pref, &UsageStrategy::casual());
        assert!(catalog.next_batch(0).is_empty());
        assert!(catalog.has_next_batch());
    }

    #[test]
    fn test_no_batches_before_filtering() {
        let mut catalog = catalog();
        assert!(!catalog.has_next_batch());
        assert!(catalog.next_batch(5).is_empty());
    }

    #[test]
    fn test_additional_within_fifteen_percent() {
        let catalog = catalog();
        let pref = UserPreference::new("casual", 0.0, 1000.0, NO_PREFERENCE);
        let mut strategy = MockRecommendationStrategy::new();
        strategy.expect_recommend().never();
        strategy.expect_name().return_const("Mock");

        let extra = catalog.additional_recommendation(&pref, &strategy);
        assert_eq!(extra.len(), 1);
        assert_eq!(extra[0].name, "Stretch");
    }

    #[test]
    fn test_additional_ignores_category_and_os() {
        let catalog = Catalog::with_phones(vec![Phone::new(
            "Other", "Brand", 1100.0, "iOS", "photography", "", vec![], 10.0, 0,
        )]);
        let pref = UserPreference::new("gaming", 0.0, 1000.0, "Android");
        let extra = catalog.additional_recommendation(&pref, &UsageStrategy::gaming());
        assert_eq!(extra.len(), 1);
        assert_eq!(extra[0].name, "Other");
    }

    #[test]
    fn test_additional_band_excludes_max_budget() {
        let catalog = Catalog::with_phones(vec![
            phone("AtBudget", 1000.0, "casual", 50.0),
            phone("JustBelowCeiling", 1149.0, "casual", 50.0),
            phone("Over", 1151.0, "casual", 50.0),
        ]);
        let pref = UserPreference::new("casual", 0.0, 1000.0, NO_PREFERENCE);
        let extra = catalog.additional_recommendation(&pref, &UsageStrategy::casual());
        let names: Vec<_> = extra.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["JustBelowCeiling"]);
    }

    #[test]
    fn test_additional_falls_back_to_strategy() {
        let catalog = catalog();
        let pref = UserPreference::new("casual", 0.0, 700.0, NO_PREFERENCE);
        let mut strategy = MockRecommendationStrategy::new();
        strategy
            .expect_recommend()
            .times(1)
            .returning(|phones, _| phones[..1].to_vec());
        strategy.expect_name().return_const("Mock");

        let extra = catalog.additional_recommendation(&pref, &strategy);
        assert_eq!(extra.len(), 1);
        assert_eq!(extra[0].name, "Budget");
    }

    #[test]
    fn test_additional_fallback_matches_main_recommendation() {
        let catalog = catalog();
        let pref = UserPreference::new("casual", 0.0, 700.0, NO_PREFERENCE);
        let strategy = UsageStrategy::casual();
        assert_eq!(
            catalog.additional_recommendation(&pref, &strategy),
            strategy.recommend(catalog.phones(), &pref)
        );
    }

    #[test]
    fn test_paginate_past_end() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, Cursor(10), 2);
        assert!(page.items.is_empty());
        assert_eq!(page.next, None);
    }

    #[test]
    fn test_paginate_reports_next_cursor() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, Cursor::default(), 2);
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.next, Some(Cursor(2)));

        let page = paginate(&items, Cursor(2), 2);
        assert_eq!(page.items, vec![3]);
        assert_eq!(page.next, None);
    }

    proptest! {
        #[test]
        fn prop_batches_reproduce_recommendation(
            prices in prop::collection::vec(0u32..1000, 0..30),
            batch_size in 1usize..5,
        ) {
            let phones: Vec<Phone> = prices
                .iter()
                .enumerate()
                .map(|(i, price)| phone(&i.to_string(), *price as f64, "casual", (i % 7) as f64))
                .collect();
            let mut catalog = Catalog::with_phones(phones);
            let pref = UserPreference::new("casual", 0.0, 1000.0, NO_PREFERENCE);
            catalog.filter_with_strategy(&pref, &UsageStrategy::casual());

            let mut seen = Vec::new();
            while catalog.has_next_batch() {
                let batch = catalog.next_batch(batch_size);
                prop_assert!(!batch.is_empty() && batch.len() <= batch_size);
                seen.extend(batch);
            }
            prop_assert_eq!(&seen[..], catalog.current_recommendation());
            prop_assert!(catalog.next_batch(batch_size).is_empty());
        }

        #[test]
        fn prop_additional_is_band_or_fallback(
            prices in prop::collection::vec(0u32..2000, 0..30),
            max in 0u32..1500,
        ) {
            let phones: Vec<Phone> = prices
                .iter()
                .map(|price| phone("p", *price as f64, "casual", 50.0))
                .collect();
            let catalog = Catalog::with_phones(phones);
            let pref = UserPreference::new("casual", 0.0, max as f64, NO_PREFERENCE);
            let strategy = UsageStrategy::casual();

            let band: Vec<Phone> = catalog
                .phones()
                .iter()
                .filter(|p| p.price > pref.max_budget && p.price <= pref.max_budget * ADDITIONAL_BUDGET_FACTOR)
                .cloned()
                .collect();
            let result = catalog.additional_recommendation(&pref, &strategy);
            if band.is_empty() {
                prop_assert_eq!(result, strategy.recommend(catalog.phones(), &pref));
            } else {
                prop_assert_eq!(result, band);
            }
        }
    }
}
