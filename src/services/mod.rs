pub mod catalog;
pub mod engine;
pub mod loader;
pub mod strategy;

pub use catalog::{paginate, Catalog, Cursor, Page};
pub use engine::{EngineError, Recommendation, RecommendationEngine};
pub use loader::{load_bonus, load_catalog, LoadError};
pub use strategy::{RecommendationStrategy, UsageStrategy};
