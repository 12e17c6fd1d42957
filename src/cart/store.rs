//! Cart Store Module
//!
//! Ordered line items mirrored to durable storage after every mutation.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cart::{CartLine, OrderSummary, CART_STORAGE_KEY};
use crate::error::StorageError;
use crate::storage::KeyValueStorage;

// == Cart Store ==
/// Shopping cart holding at most one line per product name.
pub struct CartStore {
    /// Lines in first-added order
    lines: Vec<CartLine>,
    /// Durable mirror
    storage: Arc<dyn KeyValueStorage>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    // == Restore ==
    /// Rehydrates the cart from storage.
    ///
    /// Absent or malformed data yields an empty cart. Stored data is
    /// normalized: duplicate names are merged and zero quantities dropped.
    pub fn restore(storage: Arc<dyn KeyValueStorage>) -> Self {
        let lines = match storage.get_item(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => normalize(lines),
                Err(err) => {
                    warn!("Ignoring malformed stored cart: {}", err);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("Could not read stored cart: {}", err);
                Vec::new()
            }
        };

        debug!("Cart restored with {} lines", lines.len());
        Self { lines, storage }
    }

    // == Accessors ==
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.name == name)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // == Add ==
    /// Adds one unit of `name`.
    pub fn add(&mut self, name: &str, price: u64) {
        self.add_quantity(name, price, 1);
    }

    /// Adds `quantity` units of `name`.
    ///
    /// An existing line keeps its original price. A zero quantity changes
    /// nothing.
    pub fn add_quantity(&mut self, name: &str, price: u64, quantity: u32) {
        if quantity == 0 {
            return;
        }

        match self.lines.iter_mut().find(|line| line.name == name) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine::new(name, price, quantity)),
        }

        debug!("Added {} x {} to cart", quantity, name);
        self.persist_best_effort();
    }

    // == Remove ==
    /// Drops the line for `name`. Removing an absent name is a no-op.
    pub fn remove(&mut self, name: &str) {
        let before = self.lines.len();
        self.lines.retain(|line| line.name != name);

        if self.lines.len() != before {
            debug!("Removed {} from cart", name);
        }
        self.persist_best_effort();
    }

    // == Set Quantity ==
    /// Overwrites the quantity of `name`; `quantity <= 0` removes the line.
    ///
    /// Unknown names are ignored. No upper bound is applied here.
    pub fn set_quantity(&mut self, name: &str, quantity: i64) {
        if quantity <= 0 {
            if self.line(name).is_some() {
                self.remove(name);
            }
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.name == name) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            self.persist_best_effort();
        }
    }

    // == Totals ==
    /// Sum of price times quantity over all lines; 0 when empty.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |sum, line| sum.saturating_add(line.subtotal()))
    }

    /// Total number of units, shown as the cart badge.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist_best_effort();
    }

    // == Checkout ==
    /// Completes an order for the current contents and empties the cart.
    ///
    /// Returns `None` when there is nothing to order.
    pub fn checkout(&mut self) -> Option<OrderSummary> {
        if self.lines.is_empty() {
            return None;
        }

        let summary = OrderSummary::from_lines(&self.lines);
        self.clear();
        Some(summary)
    }

    // == Persist ==
    /// Writes the full line sequence to storage.
    pub fn persist(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.lines)?;
        self.storage.set_item(CART_STORAGE_KEY, &raw)
    }

    fn persist_best_effort(&self) {
        if let Err(err) = self.persist() {
            warn!("Failed to persist cart: {}", err);
        }
    }
}

/// Merges duplicate names and drops empty lines from stored data.
fn normalize(stored: Vec<CartLine>) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = Vec::with_capacity(stored.len());

    for line in stored.into_iter().filter(|line| line.quantity > 0) {
        match lines.iter_mut().find(|existing| existing.name == line.name) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => lines.push(line),
        }
    }

    lines
}
