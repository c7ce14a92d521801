use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::{eq_ignore_case, Decimal};

/// One catalog entry
///
/// Constructed once when the catalog is loaded and never mutated afterwards.
/// `total_reviews` comes from the data source and is not required to match
/// `reviews.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub os: String,
    /// Usage category the phone is tagged with (e.g. "gaming")
    pub usage: String,
    /// Reviews in display order
    pub reviews: Vec<String>,
    /// Purchase URL, empty when unknown
    pub purchase_link: String,
    /// Precomputed sentiment score on a 0-100 scale
    pub sentiment: f64,
    pub total_reviews: u32,
}

impl Phone {
    /// Creates a phone record
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        brand: impl Into<String>,
        price: f64,
        os: impl Into<String>,
        usage: impl Into<String>,
        purchase_link: impl Into<String>,
        reviews: Vec<String>,
        sentiment: f64,
        total_reviews: u32,
    ) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            price,
            os: os.into(),
            usage: usage.into(),
            reviews,
            purchase_link: purchase_link.into(),
            sentiment,
            total_reviews,
        }
    }

    /// First review, used as a one-line summary
    pub fn summary(&self) -> Option<&str> {
        self.reviews.first().map(String::as_str)
    }

    /// Whether the phone is tagged with `usage`, ignoring case
    pub fn is_for(&self, usage: &str) -> bool {
        eq_ignore_case(&self.usage, usage)
    }

    /// Whether the price falls within `[min, max]`
    pub fn in_budget(&self, min: f64, max: f64) -> bool {
        self.price >= min && self.price <= max
    }
}

/// Pipe-joined form:
/// `name|brand|price|os|usage|[review, ...]|purchaseLink|sentiment|totalReviews`
impl Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}|[{}]|{}|{}|{}",
            self.name,
            self.brand,
            Decimal(self.price),
            self.os,
            self.usage,
            self.reviews.join(", "),
            self.purchase_link,
            Decimal(self.sentiment),
            self.total_reviews
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> Phone {
        Phone::new(
            "Pixel 8",
            "Google",
            699.0,
            "Android",
            "photography",
            "https://store.google.com/pixel8",
            vec!["Great camera".to_string(), "Battery ok".to_string()],
            88.5,
            120,
        )
    }

    #[test]
    fn test_display_pipe_format() {
        assert_eq!(
            pixel().to_string(),
            "Pixel 8|Google|699.0|Android|photography|[Great camera, Battery ok]|https://store.google.com/pixel8|88.5|120"
        );
    }

    #[test]
    fn test_display_without_reviews() {
        let phone = Phone::new("A15", "Samsung", 199.99, "Android", "casual", "", vec![], 70.0, 0);
        assert_eq!(phone.to_string(), "A15|Samsung|199.99|Android|casual|[]||70.0|0");
    }

    #[test]
    fn test_review_count_may_differ_from_reviews() {
        let phone = pixel();
        assert_eq!(phone.reviews.len(), 2);
        assert_eq!(phone.total_reviews, 120);
    }

    #[test]
    fn test_summary_is_first_review() {
        assert_eq!(pixel().summary(), Some("Great camera"));
        let bare = Phone::new("X", "Y", 1.0, "iOS", "casual", "", vec![], 0.0, 0);
        assert_eq!(bare.summary(), None);
    }

    #[test]
    fn test_is_for_ignores_case() {
        assert!(pixel().is_for("Photography"));
        assert!(!pixel().is_for("gaming"));
    }

    #[test]
    fn test_is_for_folds_non_ascii() {
        let mut phone = pixel();
        phone.usage = "Édition".to_string();
        assert!(phone.is_for("édition"));
    }

    #[test]
    fn test_in_budget_inclusive() {
        let phone = pixel();
        assert!(phone.in_budget(699.0, 699.0));
        assert!(!phone.in_budget(700.0, 800.0));
        assert!(!phone.in_budget(800.0, 600.0));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(pixel()).unwrap();
        assert_eq!(json["purchaseLink"], "https://store.google.com/pixel8");
        assert_eq!(json["totalReviews"], 120);
        assert_eq!(json["reviews"][0], "Great camera");
    }
}
