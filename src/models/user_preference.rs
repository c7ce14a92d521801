use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::{eq_ignore_case, Decimal, UsageCategory};

/// OS value meaning "do not filter by OS" (compared ignoring case)
pub const NO_PREFERENCE: &str = "No Preference";

/// One recommendation request
///
/// Built incrementally through the setters, then handed to a strategy by
/// shared reference. `min_budget > max_budget` is accepted and simply matches
/// nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreference {
    /// Usage type selected by the user (e.g. "Gaming")
    pub usage: String,
    pub min_budget: f64,
    pub max_budget: f64,
    /// Preferred OS, or [`NO_PREFERENCE`]
    pub os_preference: String,
}

impl Default for UserPreference {
    fn default() -> Self {
        Self {
            usage: String::new(),
            min_budget: 0.0,
            max_budget: 0.0,
            os_preference: NO_PREFERENCE.to_string(),
        }
    }
}

impl UserPreference {
    /// Creates a preference with every field set
    pub fn new(
        usage: impl Into<String>,
        min_budget: f64,
        max_budget: f64,
        os_preference: impl Into<String>,
    ) -> Self {
        Self {
            usage: usage.into(),
            min_budget,
            max_budget,
            os_preference: os_preference.into(),
        }
    }

    /// Builds a preference from raw adapter input. A blank OS becomes
    /// [`NO_PREFERENCE`], anything else is trimmed.
    pub fn from_selection(
        usage: UsageCategory,
        min_budget: f64,
        max_budget: f64,
        os: Option<&str>,
    ) -> Self {
        let os = match os.map(str::trim) {
            Some(os) if !os.is_empty() => os.to_string(),
            _ => NO_PREFERENCE.to_string(),
        };
        Self::new(usage.label(), min_budget, max_budget, os)
    }

    pub fn set_usage(&mut self, usage: impl Into<String>) {
        self.usage = usage.into();
    }

    pub fn set_min_budget(&mut self, min_budget: f64) {
        self.min_budget = min_budget;
    }

    pub fn set_max_budget(&mut self, max_budget: f64) {
        self.max_budget = max_budget;
    }

    pub fn set_os_preference(&mut self, os_preference: impl Into<String>) {
        self.os_preference = os_preference.into();
    }

    /// True when the OS filter should be skipped
    pub fn any_os(&self) -> bool {
        eq_ignore_case(&self.os_preference, NO_PREFERENCE)
    }

    /// Whether a phone running `os` satisfies this preference
    pub fn accepts_os(&self, os: &str) -> bool {
        self.any_os() || eq_ignore_case(os, &self.os_preference)
    }
}

/// `usage|minBudget-maxBudget|osPreference`
impl Display for UserPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}-{}|{}",
            self.usage,
            Decimal(self.min_budget),
            Decimal(self.max_budget),
            self.os_preference
        )
    }
}
