//! Review records kept per product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ANONYMOUS_AUTHOR;

// == Rating Summary ==
/// Running average of shopper ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u64,
}

impl RatingSummary {
    /// Summary with no shopper ratings yet, showing `baseline`.
    pub fn new(baseline: f64) -> Self {
        Self {
            average: baseline,
            count: 0,
        }
    }

    /// Folds one more rating into the average.
    pub fn add(&mut self, stars: u8) {
        let sum = self.average * self.count as f64 + f64::from(stars);
        self.count += 1;
        self.average = sum / self.count as f64;
    }

    /// Average rounded to one decimal place.
    pub fn rounded(&self) -> Self {
        Self {
            average: (self.average * 10.0).round() / 10.0,
            count: self.count,
        }
    }
}

// == Comment ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn anonymous(text: impl Into<String>) -> Self {
        Self {
            author: ANONYMOUS_AUTHOR.to_string(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

// == Inquiry ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    /// Waiting for a reply from the shop
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    /// Inquiry category picked in the form (product, delivery, ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

impl Inquiry {
    pub fn pending(
        kind: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            content: content.into(),
            status: InquiryStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

// == Product Reviews ==
/// Everything shoppers left on one product. Lists are newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReviews {
    pub rating: RatingSummary,
    pub comments: Vec<Comment>,
    pub inquiries: Vec<Inquiry>,
}

impl ProductReviews {
    pub fn new(baseline: f64) -> Self {
        Self {
            rating: RatingSummary::new(baseline),
            comments: Vec::new(),
            inquiries: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_average() {
        let mut summary = RatingSummary::new(4.2);
        summary.add(5);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.average, 5.0);

        summary.add(2);
        summary.add(4);
        assert_eq!(summary.count, 3);
        assert!((summary.average - 11.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.rounded().average, 3.7);
    }

    #[test]
    fn test_inquiry_wire_format() {
        let inquiry = Inquiry::pending("delivery", "Where is it?", "Still waiting on my socks");
        let json = serde_json::to_value(&inquiry).unwrap();

        assert_eq!(json["type"], "delivery");
        assert_eq!(json["status"], "pending");
    }
}
