use serde::Serialize;
use thiserror::Error;

use crate::models::{BonusSuggestions, Phone, UserPreference};

use super::{catalog::Catalog, strategy::RecommendationStrategy};

/// Error types for the recommendation engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Strategy not set: select a usage category before requesting recommendations")]
    StrategyNotSet,
}

/// Everything produced for one request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendation {
    /// Best matches within budget
    pub main: Vec<Phone>,
    /// Phones up to 15% above budget, or the main list when there are none
    pub additional: Vec<Phone>,
    /// Extra phone names for the usage category
    pub bonus: Vec<String>,
}

/// Recommendation controller over a catalog and a bonus table
///
/// The stateless calls ([`RecommendationEngine::recommend`],
/// [`RecommendationEngine::additional`], [`RecommendationEngine::run`]) take the
/// strategy per call. [`RecommendationEngine::set_strategy`] with the `get_*`
/// methods keeps a selected strategy instead and reports
/// [`EngineError::StrategyNotSet`] until one is chosen.
pub struct RecommendationEngine<'a> {
    catalog: &'a Catalog,
    bonus: &'a BonusSuggestions,
    strategy: Option<Box<dyn RecommendationStrategy + 'a>>,
}

impl<'a> RecommendationEngine<'a> {
    /// Creates an engine with no strategy selected
    pub fn new(catalog: &'a Catalog, bonus: &'a BonusSuggestions) -> Self {
        Self {
            catalog,
            bonus,
            strategy: None,
        }
    }

    /// Replaces the selected strategy
    pub fn set_strategy(&mut self, strategy: impl RecommendationStrategy + 'a) {
        tracing::debug!(strategy = strategy.name(), "Strategy selected");
        self.strategy = Some(Box::new(strategy));
    }

    /// Main recommendation using the selected strategy
    pub fn get_recommendation(&self, pref: &UserPreference) -> Result<Vec<Phone>, EngineError> {
        let strategy = self.selected()?;
        Ok(self.recommend(pref, strategy))
    }

    /// Above-budget recommendation using the selected strategy
    pub fn get_additional_recommendations(
        &self,
        pref: &UserPreference,
    ) -> Result<Vec<Phone>, EngineError> {
        let strategy = self.selected()?;
        Ok(self.additional(pref, strategy))
    }

    /// Bonus suggestions for the preference's usage; empty when none are known
    pub fn get_bonus_suggestions(&self, pref: &UserPreference) -> Vec<String> {
        self.bonus.get(&pref.usage).to_vec()
    }

    /// Main recommendation with an explicit strategy
    pub fn recommend(
        &self,
        pref: &UserPreference,
        strategy: &dyn RecommendationStrategy,
    ) -> Vec<Phone> {
        strategy.recommend(self.catalog.phones(), pref)
    }

    /// Above-budget recommendation with an explicit strategy
    pub fn additional(
        &self,
        pref: &UserPreference,
        strategy: &dyn RecommendationStrategy,
    ) -> Vec<Phone> {
        self.catalog.additional_recommendation(pref, strategy)
    }

    /// Main, additional and bonus results for one request
    pub fn run(
        &self,
        pref: &UserPreference,
        strategy: &dyn RecommendationStrategy,
    ) -> Recommendation {
        let result = Recommendation {
            main: self.recommend(pref, strategy),
            additional: self.additional(pref, strategy),
            bonus: self.get_bonus_suggestions(pref),
        };

        tracing::info!(
            strategy = strategy.name(),
            preference = %pref,
            main = result.main.len(),
            additional = result.additional.len(),
            bonus = result.bonus.len(),
            "Recommendation computed"
        );

        result
    }

    fn selected(&self) -> Result<&dyn RecommendationStrategy, EngineError> {
        self.strategy.as_deref().ok_or(EngineError::StrategyNotSet)
    }
}
