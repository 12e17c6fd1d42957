//! Form Handler Module
//!
//! Validate, mark busy, submit, then reset or report.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use super::{BusyTracker, FormSubmitter};
use crate::error::{ErrorCategory, SubmissionError};
use crate::error_log::{ErrorHandler, RequestOrigin};
use crate::notice::{Notice, DEFAULT_DISMISS_MS};
use crate::validation::Form;

/// Context string recorded for submission failures.
pub const SUBMISSION_CONTEXT: &str = "Form Submission";

/// Message shown after a successful submission.
pub const SUCCESS_MESSAGE: &str = "Submitted successfully.";

// == Submit Error ==
/// Why a submission did not go through. Each variant carries the notice
/// to show.
#[derive(Error, Debug, Clone)]
pub enum SubmitError {
    /// Validation failed; nothing was sent
    #[error("Form {form_id} failed validation")]
    Invalid { form_id: String, notice: Notice },

    /// The submitter reported a failure
    #[error("Form {form_id} submission failed: {error}")]
    Failed {
        form_id: String,
        error: SubmissionError,
        notice: Notice,
    },
}

impl SubmitError {
    pub fn notice(&self) -> &Notice {
        match self {
            SubmitError::Invalid { notice, .. } | SubmitError::Failed { notice, .. } => notice,
        }
    }
}

// == Form Handler ==
#[derive(Clone)]
pub struct FormHandler {
    submitter: Arc<dyn FormSubmitter>,
    errors: Arc<ErrorHandler>,
    busy: BusyTracker,
    notice_dismiss_ms: u64,
}

impl FormHandler {
    pub fn new(submitter: Arc<dyn FormSubmitter>, errors: Arc<ErrorHandler>) -> Self {
        Self {
            submitter,
            errors,
            busy: BusyTracker::new(),
            notice_dismiss_ms: DEFAULT_DISMISS_MS,
        }
    }

    pub fn with_notice_dismiss_ms(mut self, millis: u64) -> Self {
        self.notice_dismiss_ms = millis;
        self
    }

    pub fn busy(&self) -> &BusyTracker {
        &self.busy
    }

    // == Submit ==
    /// Runs one submission of `form` to completion.
    ///
    /// On success the form is reset. On failure the form keeps its values
    /// and the error goes through the central handler. The busy mark is
    /// released whatever the outcome.
    pub async fn submit(
        &self,
        form: &mut Form,
        origin: &RequestOrigin,
    ) -> Result<Notice, SubmitError> {
        let form_id = form.id().to_string();

        if !form.validate() {
            debug!("Form {} rejected by validation", form_id);
            return Err(SubmitError::Invalid {
                form_id,
                notice: Notice::danger(ErrorCategory::Validation.user_message())
                    .dismiss_after(self.notice_dismiss_ms),
            });
        }

        let _busy = self.busy.acquire(&form_id);
        let data = form.values();

        match self.submitter.submit(&form_id, &data).await {
            Ok(()) => {
                info!("Form {} submitted", form_id);
                form.reset();
                Ok(Notice::success(SUCCESS_MESSAGE).dismiss_after(self.notice_dismiss_ms))
            }
            Err(error) => {
                let notice = self.errors.handle(&error, SUBMISSION_CONTEXT, origin);
                Err(SubmitError::Failed {
                    form_id,
                    error,
                    notice,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_log::{ErrorLog, DEFAULT_LOG_CAPACITY};
    use crate::notice::NoticeLevel;
    use crate::storage::MemoryStorage;
    use crate::submission::FormData;
    use crate::validation::{FieldRules, FieldState, FormSchema};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records calls and the busy state seen while running.
    struct RecordingSubmitter {
        calls: AtomicUsize,
        busy_during_call: Mutex<Option<bool>>,
        busy: Mutex<Option<BusyTracker>>,
        result: Result<(), SubmissionError>,
    }

    impl RecordingSubmitter {
        fn new(result: Result<(), SubmissionError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                busy_during_call: Mutex::new(None),
                busy: Mutex::new(None),
                result,
            })
        }
    }

    #[async_trait]
    impl FormSubmitter for RecordingSubmitter {
        async fn submit(&self, form_id: &str, _data: &FormData) -> Result<(), SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let busy = self
                .busy
                .lock()
                .unwrap()
                .as_ref()
                .map(|tracker| tracker.is_busy(form_id));
            *self.busy_during_call.lock().unwrap() = busy;
            self.result.clone()
        }
    }

    fn handler(submitter: Arc<RecordingSubmitter>) -> FormHandler {
        let errors = Arc::new(ErrorHandler::new(ErrorLog::new(
            Arc::new(MemoryStorage::new()),
            DEFAULT_LOG_CAPACITY,
        )));
        let handler = FormHandler::new(submitter.clone(), errors);
        *submitter.busy.lock().unwrap() = Some(handler.busy().clone());
        handler
    }

    fn signup() -> FormSchema {
        FormSchema::new("signup")
            .field("name", FieldRules::text().required())
            .field("email", FieldRules::email())
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_submitted() {
        let submitter = RecordingSubmitter::new(Ok(()));
        let handler = handler(submitter.clone());
        let mut form = signup().instantiate();
        form.set_value("email", "a@b.co");

        let result = handler.submit(&mut form, &RequestOrigin::default()).await;

        assert!(matches!(result, Err(SubmitError::Invalid { .. })));
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(form.field("name").unwrap().state, FieldState::Invalid);
        assert_eq!(form.field("email").unwrap().state, FieldState::Valid);
    }

    #[tokio::test]
    async fn test_success_resets_form_and_releases_busy() {
        let submitter = RecordingSubmitter::new(Ok(()));
        let handler = handler(submitter.clone());
        let mut form = signup().instantiate();
        form.fill([("name", "Shopper"), ("email", "a@b.co")]);

        let notice = tokio_test::assert_ok!(handler.submit(&mut form, &RequestOrigin::default()).await);

        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*submitter.busy_during_call.lock().unwrap(), Some(true));
        assert!(!handler.busy().is_busy("signup"));
        assert_eq!(form, signup().instantiate());
    }

    #[tokio::test]
    async fn test_failure_is_logged_and_keeps_values() {
        let submitter =
            RecordingSubmitter::new(Err(SubmissionError::Timeout(Duration::from_secs(10))));
        let handler = handler(submitter.clone());
        let mut form = signup().instantiate();
        form.fill([("name", "Shopper")]);

        let err = handler
            .submit(&mut form, &RequestOrigin::default())
            .await
            .unwrap_err();

        assert_eq!(err.notice().message, ErrorCategory::Timeout.user_message());
        assert!(matches!(err, SubmitError::Failed { .. }));
        assert!(!handler.busy().is_busy("signup"));
        assert_eq!(form.field("name").unwrap().value, "Shopper");

        let logged = handler.errors.log().entries();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].context, SUBMISSION_CONTEXT);
    }
}
