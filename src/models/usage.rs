use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Usage category shared by phone records and user intent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UsageCategory {
    Casual,
    Entertainment,
    Gaming,
    Photography,
    Productivity,
}

impl UsageCategory {
    pub const ALL: [UsageCategory; 5] = [
        UsageCategory::Casual,
        UsageCategory::Entertainment,
        UsageCategory::Gaming,
        UsageCategory::Photography,
        UsageCategory::Productivity,
    ];

    /// Resolves the numeric menu selector (1-5). Out-of-range values fall back
    /// to `Casual`.
    pub fn from_selector(choice: i64) -> Self {
        match choice {
            2 => UsageCategory::Entertainment,
            3 => UsageCategory::Gaming,
            4 => UsageCategory::Photography,
            5 => UsageCategory::Productivity,
            _ => UsageCategory::Casual,
        }
    }

    /// Lowercase literal phone records are tagged with
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageCategory::Casual => "casual",
            UsageCategory::Entertainment => "entertainment",
            UsageCategory::Gaming => "gaming",
            UsageCategory::Photography => "photography",
            UsageCategory::Productivity => "productivity",
        }
    }

    /// Capitalised form shown to users
    pub fn label(&self) -> &'static str {
        match self {
            UsageCategory::Casual => "Casual",
            UsageCategory::Entertainment => "Entertainment",
            UsageCategory::Gaming => "Gaming",
            UsageCategory::Photography => "Photography",
            UsageCategory::Productivity => "Productivity",
        }
    }
}

impl Display for UsageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
