//! Cart Line Module
//!
//! One product's aggregated quantity entry in the cart.

use serde::{Deserialize, Serialize};

// == Cart Line ==
/// A line item, serialized as `{"name", "price", "quantity"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product name, unique within a cart
    pub name: String,
    /// Unit price in won
    pub price: u64,
    /// Always at least 1 while the line is in a cart
    pub quantity: u32,
}

impl CartLine {
    pub fn new(name: impl Into<String>, price: u64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal() {
        let line = CartLine::new("Holey Socks", 5000, 3);
        assert_eq!(line.subtotal(), 15000);
    }

    #[test]
    fn test_subtotal_saturates() {
        let line = CartLine::new("Gold Bell", u64::MAX, 2);
        assert_eq!(line.subtotal(), u64::MAX);
    }

    #[test]
    fn test_wire_format() {
        let line = CartLine::new("Silent Bell", 18000, 1);
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"name":"Silent Bell","price":18000,"quantity":1}"#);
    }
}
