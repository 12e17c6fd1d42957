//! Busy State Module
//!
//! Marks a form as busy while its submission is in flight. The mark is
//! held by a guard and released when the guard drops, on every path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// == Busy Tracker ==
/// Per-form in-flight counters, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct BusyTracker {
    in_flight: Arc<Mutex<HashMap<String, usize>>>,
}

impl BusyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `form_id` busy until the returned guard is dropped.
    pub fn acquire(&self, form_id: &str) -> BusyGuard {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            *in_flight.entry(form_id.to_string()).or_insert(0) += 1;
        }
        BusyGuard {
            tracker: self.clone(),
            form_id: form_id.to_string(),
        }
    }

    pub fn is_busy(&self, form_id: &str) -> bool {
        self.in_flight
            .lock()
            .map(|in_flight| in_flight.contains_key(form_id))
            .unwrap_or(false)
    }

    fn release(&self, form_id: &str) {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            if let Some(count) = in_flight.get_mut(form_id) {
                *count -= 1;
                if *count == 0 {
                    in_flight.remove(form_id);
                }
            }
        }
    }
}

// == Busy Guard ==
#[derive(Debug)]
pub struct BusyGuard {
    tracker: BusyTracker,
    form_id: String,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.tracker.release(&self.form_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let tracker = BusyTracker::new();

        {
            let _guard = tracker.acquire("inquiry");
            assert!(tracker.is_busy("inquiry"));
            assert!(!tracker.is_busy("comment"));
        }

        assert!(!tracker.is_busy("inquiry"));
    }

    #[test]
    fn test_overlapping_guards() {
        let tracker = BusyTracker::new();

        let first = tracker.acquire("inquiry");
        let second = tracker.acquire("inquiry");
        drop(first);
        assert!(tracker.is_busy("inquiry"));

        drop(second);
        assert!(!tracker.is_busy("inquiry"));
    }
}
