mod bonus;
mod phone;
mod usage;
mod user_preference;

pub use bonus::BonusSuggestions;
pub use phone::Phone;
pub use usage::UsageCategory;
pub use user_preference::{UserPreference, NO_PREFERENCE};

use std::fmt;

/// Formats a float the way the catalog's text form expects: whole numbers keep
/// a trailing `.0` (`999.0`), everything else prints its shortest form.
pub(crate) struct Decimal(pub f64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Case-insensitive equality that folds non-ASCII letters too (`ÖS` == `ös`)
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
