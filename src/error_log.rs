//! Error Log Module
//!
//! Centralized error handling: every caught failure is logged through
//! tracing, appended to a capped log in durable storage, and turned into a
//! notice for the shopper.

use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use axum::http::{header::USER_AGENT, HeaderMap, Uri};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::{ErrorCategory, ShopError, StorageError, SubmissionError};
use crate::notice::{Notice, DEFAULT_DISMISS_MS};
use crate::storage::KeyValueStorage;

// == Public Constants ==
/// Storage key holding the error log
pub const ERROR_LOG_KEY: &str = "error_logs";

/// Records kept before the oldest are dropped
pub const DEFAULT_LOG_CAPACITY: usize = 100;

// == Categorized ==
/// Errors that declare which user-facing category they belong to.
pub trait Categorized {
    fn category(&self) -> ErrorCategory;
}

impl Categorized for ShopError {
    fn category(&self) -> ErrorCategory {
        ShopError::category(self)
    }
}

impl Categorized for SubmissionError {
    fn category(&self) -> ErrorCategory {
        SubmissionError::category(self)
    }
}

// == Error Record ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub message: String,
    pub stack: Option<String>,
    pub context: String,
    /// ISO-8601 UTC timestamp
    pub timestamp: String,
    pub user_agent: Option<String>,
    pub url: Option<String>,
}

/// Where a failing request came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOrigin {
    pub user_agent: Option<String>,
    pub url: Option<String>,
}

impl RequestOrigin {
    pub fn from_http(headers: &HeaderMap, uri: &Uri) -> Self {
        Self {
            user_agent: headers
                .get(USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
            url: Some(uri.to_string()),
        }
    }
}

// == Reported Error ==
/// Owned summary of a caught error, as it goes into the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedError {
    pub category: ErrorCategory,
    pub message: String,
    /// The error's source chain, if any
    pub stack: Option<String>,
}

impl ReportedError {
    pub fn from_error<E>(error: &E) -> Self
    where
        E: StdError + Categorized,
    {
        Self {
            category: error.category(),
            message: error.to_string(),
            stack: source_chain(error),
        }
    }
}

impl ErrorRecord {
    pub fn from_reported(reported: &ReportedError, context: &str, origin: &RequestOrigin) -> Self {
        Self {
            message: reported.message.clone(),
            stack: reported.stack.clone(),
            context: context.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            user_agent: origin.user_agent.clone(),
            url: origin.url.clone(),
        }
    }
}

/// Joins the `source()` chain below `error`, if there is one.
fn source_chain(error: &dyn StdError) -> Option<String> {
    let mut causes = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        causes.push(format!("caused by: {cause}"));
        current = cause.source();
    }

    if causes.is_empty() {
        None
    } else {
        Some(causes.join("\n"))
    }
}

// == Error Log ==
/// Capped ring buffer of error records, oldest dropped first.
pub struct ErrorLog {
    storage: Arc<dyn KeyValueStorage>,
    capacity: usize,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl ErrorLog {
    pub fn new(storage: Arc<dyn KeyValueStorage>, capacity: usize) -> Self {
        Self {
            storage,
            capacity,
            write_lock: Mutex::new(()),
        }
    }

    /// Stored records, oldest first. Malformed data reads as empty.
    pub fn entries(&self) -> Vec<ErrorRecord> {
        match self.storage.get_item(ERROR_LOG_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Ignoring malformed error log: {}", err);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("Could not read error log: {}", err);
                Vec::new()
            }
        }
    }

    // == Record ==
    pub fn record(&self, record: ErrorRecord) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;

        let mut records = self.entries();
        records.push(record);
        if records.len() > self.capacity {
            let excess = records.len() - self.capacity;
            records.drain(..excess);
        }

        let raw = serde_json::to_string(&records)?;
        self.storage.set_item(ERROR_LOG_KEY, &raw)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        self.storage.remove_item(ERROR_LOG_KEY)
    }
}

// == Error Handler ==
/// Single funnel for caught errors.
pub struct ErrorHandler {
    log: ErrorLog,
    notice_dismiss_ms: u64,
}

impl ErrorHandler {
    pub fn new(log: ErrorLog) -> Self {
        Self {
            log,
            notice_dismiss_ms: DEFAULT_DISMISS_MS,
        }
    }

    pub fn with_notice_dismiss_ms(mut self, millis: u64) -> Self {
        self.notice_dismiss_ms = millis;
        self
    }

    pub fn log(&self) -> &ErrorLog {
        &self.log
    }

    // == Handle ==
    /// Logs `error`, records it, and returns the notice to show.
    pub fn handle<E>(&self, error: &E, context: &str, origin: &RequestOrigin) -> Notice
    where
        E: StdError + Categorized,
    {
        self.report(&ReportedError::from_error(error), context, origin)
    }

    /// Same as [`ErrorHandler::handle`] for an error already summarized.
    ///
    /// Never fails: a storage problem while recording is only logged.
    pub fn report(&self, reported: &ReportedError, context: &str, origin: &RequestOrigin) -> Notice {
        let category = reported.category;
        error!(?category, "Error in {}: {}", context, reported.message);

        let record = ErrorRecord::from_reported(reported, context, origin);
        if let Err(err) = self.log.record(record) {
            warn!("Could not record error: {}", err);
        }

        Notice::danger(category.user_message()).dismiss_after(self.notice_dismiss_ms)
    }
}
