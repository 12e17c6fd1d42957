//! Order summary produced when a cart is checked out.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cart::CartLine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub subtotal: u64,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
            subtotal: line.subtotal(),
        }
    }
}

// == Order Summary ==
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub items: Vec<OrderItem>,
    pub total: u64,
    pub item_count: u64,
    pub completed_at: DateTime<Utc>,
}

impl OrderSummary {
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let items: Vec<OrderItem> = lines.iter().map(OrderItem::from).collect();
        let total = items
            .iter()
            .fold(0u64, |sum, item| sum.saturating_add(item.subtotal));
        let item_count = items.iter().map(|item| u64::from(item.quantity)).sum();

        Self {
            items,
            total,
            item_count,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_totals() {
        let lines = vec![
            CartLine::new("Transparent Umbrella", 12000, 2),
            CartLine::new("Holey Socks", 5000, 1),
        ];
        let summary = OrderSummary::from_lines(&lines);

        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.total, 29000);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.items[0].subtotal, 24000);
    }
}
