//! Form submitters: where validated form data is sent.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::error::SubmissionError;

/// Field values of a submitted form.
pub type FormData = BTreeMap<String, String>;

// == Form Submitter ==
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    /// Delivers `data` for form `form_id`.
    async fn submit(&self, form_id: &str, data: &FormData) -> Result<(), SubmissionError>;
}

// == Simulated Submitter ==
/// Stand-in for an unreliable remote endpoint.
///
/// Waits `latency`, then succeeds with probability `success_rate`.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    success_rate: f64,
    latency: Duration,
}

impl SimulatedSubmitter {
    pub const DEFAULT_SUCCESS_RATE: f64 = 0.9;
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

    /// `success_rate` is clamped into `0.0..=1.0`; NaN counts as 0.
    pub fn new(success_rate: f64, latency: Duration) -> Self {
        let success_rate = if success_rate.is_nan() {
            0.0
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self {
            success_rate,
            latency,
        }
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SUCCESS_RATE, Self::DEFAULT_LATENCY)
    }
}

#[async_trait]
impl FormSubmitter for SimulatedSubmitter {
    async fn submit(&self, form_id: &str, data: &FormData) -> Result<(), SubmissionError> {
        tokio::time::sleep(self.latency).await;

        let succeeded = rand::thread_rng().gen_bool(self.success_rate);
        debug!(
            "Simulated submission of {} ({} fields): {}",
            form_id,
            data.len(),
            if succeeded { "ok" } else { "failed" }
        );

        if succeeded {
            Ok(())
        } else {
            Err(SubmissionError::Server("The server reported an error".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_succeeds_at_rate_one() {
        let submitter = SimulatedSubmitter::new(1.0, Duration::ZERO);
        for _ in 0..20 {
            assert!(submitter.submit("comment", &FormData::new()).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_always_fails_at_rate_zero() {
        let submitter = SimulatedSubmitter::new(0.0, Duration::ZERO);
        let result = submitter.submit("comment", &FormData::new()).await;
        assert!(matches!(result, Err(SubmissionError::Server(_))));
    }

    #[test]
    fn test_rate_is_clamped() {
        assert_eq!(SimulatedSubmitter::new(4.0, Duration::ZERO).success_rate(), 1.0);
        assert_eq!(SimulatedSubmitter::new(-1.0, Duration::ZERO).success_rate(), 0.0);
        assert_eq!(SimulatedSubmitter::new(f64::NAN, Duration::ZERO).success_rate(), 0.0);
        assert_eq!(SimulatedSubmitter::default().success_rate(), 0.9);
    }
}
