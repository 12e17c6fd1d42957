//! Review Board Module
//!
//! Ratings, comments and inquiries for every product, mirrored to durable
//! storage after each change.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{
    Comment, Inquiry, ProductReviews, RatingSummary, MAX_STARS, MIN_STARS, REVIEWS_STORAGE_KEY,
};
use crate::catalog::{self, Product};
use crate::error::StorageError;
use crate::storage::KeyValueStorage;
use crate::submission::FormData;
use crate::validation::{COMMENT_FORM_ID, INQUIRY_FORM_ID};

// == Review Board ==
pub struct ReviewBoard {
    products: BTreeMap<String, ProductReviews>,
    storage: Arc<dyn KeyValueStorage>,
}

impl fmt::Debug for ReviewBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewBoard")
            .field("products", &self.products.len())
            .finish_non_exhaustive()
    }
}

impl ReviewBoard {
    // == Restore ==
    /// Rehydrates the board from storage. Absent or malformed data yields
    /// an empty board.
    pub fn restore(storage: Arc<dyn KeyValueStorage>) -> Self {
        let products = match storage.get_item(REVIEWS_STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Ignoring malformed stored reviews: {}", err);
                BTreeMap::new()
            }),
            Ok(None) => BTreeMap::new(),
            Err(err) => {
                warn!("Could not read stored reviews: {}", err);
                BTreeMap::new()
            }
        };

        Self { products, storage }
    }

    // == Accessors ==
    /// Reviews for `name`. A product nobody reviewed shows its catalog rating.
    pub fn reviews(&self, name: &str) -> ProductReviews {
        self.products
            .get(name)
            .cloned()
            .unwrap_or_else(|| ProductReviews::new(baseline(name)))
    }

    /// Overlays the shopper rating onto catalog data.
    pub fn apply_rating(&self, product: &mut Product) {
        if let Some(reviews) = self.products.get(&product.name) {
            let rating = reviews.rating.rounded();
            product.rating = rating.average as f32;
            product.rating_count = rating.count;
        }
    }

    // == Rate ==
    /// Adds a rating of `stars`. Returns `None` outside 1..=5.
    pub fn rate(&mut self, name: &str, stars: u8) -> Option<RatingSummary> {
        if !(MIN_STARS..=MAX_STARS).contains(&stars) {
            return None;
        }

        let reviews = self.entry(name);
        reviews.rating.add(stars);
        let summary = reviews.rating.clone();

        debug!("Rated {} with {} stars", name, stars);
        self.persist_best_effort();
        Some(summary)
    }

    // == Comments and Inquiries ==
    pub fn add_comment(&mut self, name: &str, text: &str) -> Comment {
        let comment = Comment::anonymous(text.trim());
        self.entry(name).comments.insert(0, comment.clone());

        debug!("Comment added to {}", name);
        self.persist_best_effort();
        comment
    }

    pub fn add_inquiry(&mut self, name: &str, kind: &str, title: &str, content: &str) -> Inquiry {
        let inquiry = Inquiry::pending(kind.trim(), title.trim(), content.trim());
        self.entry(name).inquiries.insert(0, inquiry.clone());

        debug!("Inquiry added to {}", name);
        self.persist_best_effort();
        inquiry
    }

    /// Keeps the content of a successfully submitted shop form.
    ///
    /// Returns false for forms that leave nothing on the product page.
    pub fn record_submission(&mut self, form_id: &str, name: &str, data: &FormData) -> bool {
        let field = |key: &str| data.get(key).map(String::as_str).unwrap_or_default();

        match form_id {
            COMMENT_FORM_ID => {
                self.add_comment(name, field("comment_text"));
                true
            }
            INQUIRY_FORM_ID => {
                self.add_inquiry(
                    name,
                    field("inquiry_type"),
                    field("title"),
                    field("content"),
                );
                true
            }
            _ => false,
        }
    }

    // == Persist ==
    pub fn persist(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.products)?;
        self.storage.set_item(REVIEWS_STORAGE_KEY, &raw)
    }

    fn persist_best_effort(&self) {
        if let Err(err) = self.persist() {
            warn!("Failed to persist reviews: {}", err);
        }
    }

    fn entry(&mut self, name: &str) -> &mut ProductReviews {
        self.products
            .entry(name.to_string())
            .or_insert_with(|| ProductReviews::new(baseline(name)))
    }
}

fn baseline(name: &str) -> f64 {
    f64::from(catalog::base_rating(name))
}
