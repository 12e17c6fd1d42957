//! Notice Module
//!
//! Transient, dismissible messages shown to the shopper.

use serde::Serialize;

/// Default auto-dismiss delay in milliseconds.
pub const DEFAULT_DISMISS_MS: u64 = 3000;

// == Notice Level ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Danger,
    Warning,
    Info,
}

// == Notice ==
/// A user-facing notice that auto-dismisses after `dismiss_after_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub dismiss_after_ms: u64,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            dismiss_after_ms: DEFAULT_DISMISS_MS,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Danger, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    /// Overrides the auto-dismiss delay.
    pub fn dismiss_after(mut self, millis: u64) -> Self {
        self.dismiss_after_ms = millis;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_defaults() {
        let notice = Notice::success("Added to cart");
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.dismiss_after_ms, DEFAULT_DISMISS_MS);
    }

    #[test]
    fn test_notice_serialize() {
        let notice = Notice::warning("Offline").dismiss_after(500);
        let json = serde_json::to_string(&notice).unwrap();
        assert!(json.contains(r#""level":"warning""#));
        assert!(json.contains(r#""dismiss_after_ms":500"#));
    }

    #[test]
    fn test_info_level() {
        assert_eq!(Notice::info("hi").level, NoticeLevel::Info);
    }
}
