use std::sync::Arc;

use crate::models::BonusSuggestions;
use crate::services::{Catalog, RecommendationEngine};

/// Shared application state
///
/// Read-only after startup: requests pass their strategy and cursor explicitly,
/// so nothing here needs locking.
#[derive(Clone, Default)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub bonus: Arc<BonusSuggestions>,
}

impl AppState {
    /// Creates state over an already loaded catalog and bonus table
    pub fn new(catalog: Catalog, bonus: BonusSuggestions) -> Self {
        Self {
            catalog: Arc::new(catalog),
            bonus: Arc::new(bonus),
        }
    }

    /// Engine borrowing this state's catalog and bonus table
    pub fn engine(&self) -> RecommendationEngine<'_> {
        RecommendationEngine::new(&self.catalog, &self.bonus)
    }
}
