//! Stimulus emitters: one-shot requests that stand in for a wearable and a
//! lab system.
//!
//! An emitter never touches the dashboard's view state. Whatever the backend
//! does with the value shows up later through the telemetry stream. Requests
//! are not retried, not cancellable once issued, and not coordinated with
//! each other.

use std::sync::Arc;

use log::{info, warn};
use tokio::task::JoinHandle;

use crate::backend::{CareBackend, ClinicalPayload, HealthConnectPayload};
use crate::config::EmitterConfig;
use crate::error::{ErrorCode, TransportError, ValidationError};
use crate::notify::Notifier;

pub const WEARABLE_NOTICE: &str =
    "Simulating stressful wearable data (low HRV). The Progress Score will decrease.";
pub const LAB_PROMPT: &str =
    "Enter new Clinical Biomarker level (e.g., 8.5 is high, 2.0 is good):";
pub const LAB_NOTICE: &str =
    "Sending new lab result. A higher biomarker level will decrease the Progress Score.";

/// Parse an operator-entered biomarker level.
///
/// Leading whitespace is skipped and the longest leading decimal number is
/// used, so `"8.5 mmol"` reads as 8.5. Input with no leading number, or one
/// that overflows to infinity, is rejected.
pub fn parse_level(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput {
            field: "biomarker_level".to_string(),
        });
    }
    match numeric_prefix(trimmed).parse::<f64>() {
        Ok(level) if level.is_finite() => Ok(level),
        _ => Err(ValidationError::InvalidNumber {
            input: trimmed.to_string(),
        }),
    }
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
/// Empty if `s` does not start with a number.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    &s[..end]
}

fn failure_message(err: &TransportError) -> String {
    format!("Failed to send data: {}", err.message())
}

/// The dashboard's two stimulus buttons.
pub struct StimulusEmitters<B, N> {
    backend: Arc<B>,
    notifier: Arc<N>,
    config: EmitterConfig,
}

impl<B, N> Clone for StimulusEmitters<B, N> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            notifier: Arc::clone(&self.notifier),
            config: self.config.clone(),
        }
    }
}

impl<B, N> StimulusEmitters<B, N>
where
    B: CareBackend + 'static,
    N: Notifier + 'static,
{
    pub fn new(backend: Arc<B>, notifier: Arc<N>, config: EmitterConfig) -> Self {
        Self {
            backend,
            notifier,
            config,
        }
    }

    /// Push a low-HRV reading as if it came from the wearable.
    ///
    /// # Returns
    /// The transport error, if any. Connection failures have already been
    /// shown through the notifier; error statuses are only logged.
    pub async fn simulate_wearable(&self) -> Result<(), TransportError> {
        let payload = HealthConnectPayload {
            hrv: self.config.wearable_hrv,
        };
        self.notifier.alert(WEARABLE_NOTICE);
        info!("[Stimulus] Sending wearable HRV {}", payload.hrv);

        self.backend
            .send_health_connect(payload)
            .await
            .inspect_err(|err| self.report_failure(err))
    }

    /// Ask the operator for a biomarker level and send it.
    ///
    /// A cancelled or empty answer falls back to the configured default.
    /// An answer with no leading number aborts without a request.
    ///
    /// The prompt blocks, so it runs on the blocking thread pool.
    ///
    /// # Returns
    /// * `Ok(Some(level))` - Level sent
    /// * `Ok(None)` - Aborted on invalid input, nothing sent
    /// * `Err(TransportError)` - Request failed
    pub async fn enter_lab_results(&self) -> Result<Option<f64>, TransportError> {
        let default = self.config.default_biomarker_level.to_string();
        let notifier = Arc::clone(&self.notifier);
        let prompt_default = default.clone();
        let answer =
            tokio::task::spawn_blocking(move || notifier.prompt(LAB_PROMPT, &prompt_default))
                .await
                .unwrap_or_else(|err| {
                    warn!("[Stimulus] Lab prompt did not complete: {}", err);
                    None
                })
                .filter(|answer| !answer.is_empty())
                .unwrap_or(default);

        let level = match parse_level(&answer) {
            Ok(level) => level,
            Err(err) => {
                info!("[Stimulus] Lab entry aborted: {}", err.message());
                return Ok(None);
            }
        };

        self.submit_lab_level(level).await.map(|_| Some(level))
    }

    /// Send a biomarker level without prompting.
    pub async fn submit_lab_level(&self, level: f64) -> Result<(), TransportError> {
        self.notifier.alert(LAB_NOTICE);
        info!("[Stimulus] Sending biomarker level {}", level);

        self.backend
            .send_clinical(ClinicalPayload {
                biomarker_level: level,
            })
            .await
            .inspect_err(|err| self.report_failure(err))
    }

    /// Alert the user when the request never got an answer. A backend that
    /// answered with an error status is only logged.
    fn report_failure(&self, err: &TransportError) {
        match err {
            TransportError::Status { status } => {
                info!("[Stimulus] Backend rejected the request: HTTP {}", status);
            }
            _ => self.notifier.alert(&failure_message(err)),
        }
    }

    /// Fire [`simulate_wearable`](Self::simulate_wearable) on a detached task.
    ///
    /// The task is independent of any dashboard: unmounting does not cancel it.
    pub fn spawn_simulate_wearable(&self) -> JoinHandle<Result<(), TransportError>> {
        let emitters = self.clone();
        tokio::spawn(async move { emitters.simulate_wearable().await })
    }

    /// Fire [`submit_lab_level`](Self::submit_lab_level) on a detached task.
    pub fn spawn_submit_lab_level(&self, level: f64) -> JoinHandle<Result<(), TransportError>> {
        let emitters = self.clone();
        tokio::spawn(async move { emitters.submit_lab_level(level).await })
    }
}
