//! Insertion Order Module
//!
//! Remembers the order keys were first inserted, for FIFO eviction.

use std::collections::VecDeque;

// == Insertion Order ==
/// Tracks key insertion order.
///
/// - Front = inserted longest ago
/// - Back = inserted most recently
///
/// Re-recording a key that is already tracked keeps its position, so
/// overwriting a value does not make it younger. Reads never reorder.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record ==
    /// Appends `key` unless it is already tracked.
    pub fn record(&mut self, key: &str) {
        if !self.contains(key) {
            self.order.push_back(key.to_string());
        }
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop Oldest ==
    /// Returns and forgets the earliest-inserted key.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.front()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_new() {
        let order = InsertionOrder::new();
        assert!(order.is_empty());
        assert_eq!(order.len(), 0);
    }

    #[test]
    fn test_record_new_keys() {
        let mut order = InsertionOrder::new();

        order.record("key1");
        order.record("key2");
        order.record("key3");

        assert_eq!(order.len(), 3);
        assert_eq!(order.peek_oldest(), Some(&"key1".to_string()));
    }

    #[test]
    fn test_record_existing_key_keeps_position() {
        let mut order = InsertionOrder::new();

        order.record("key1");
        order.record("key2");
        order.record("key1");

        assert_eq!(order.len(), 2);
        assert_eq!(order.pop_oldest(), Some("key1".to_string()));
        assert_eq!(order.pop_oldest(), Some("key2".to_string()));
    }

    #[test]
    fn test_pop_oldest_empty() {
        let mut order = InsertionOrder::new();
        assert_eq!(order.pop_oldest(), None);
    }

    #[test]
    fn test_remove_then_reinsert_goes_to_back() {
        let mut order = InsertionOrder::new();

        order.record("a");
        order.record("b");
        order.remove("a");
        order.record("a");

        assert_eq!(order.pop_oldest(), Some("b".to_string()));
        assert_eq!(order.pop_oldest(), Some("a".to_string()));
    }

    #[test]
    fn test_remove_nonexistent_key() {
        let mut order = InsertionOrder::new();

        order.record("key1");
        order.remove("nonexistent");

        assert_eq!(order.len(), 1);
        assert!(order.contains("key1"));
    }

    #[test]
    fn test_clear() {
        let mut order = InsertionOrder::new();
        order.record("a");
        order.clear();
        assert!(order.is_empty());
    }
}
