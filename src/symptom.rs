//! Symptom tracker view state.

use log::info;

use crate::backend::{CareBackend, PhotoUpload, Severity, SymptomReport};
use crate::error::ErrorCode;

pub const MISSING_DESCRIPTION: &str = "Please describe your symptom before analyzing.";
pub const ANALYSIS_FAILED: &str =
    "Failed to get analysis. Please ensure the backend server is running and try again.";

/// Outcome of the last analysis request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymptomResponse {
    pub severity: Option<Severity>,
    pub advice: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Description was empty; no request was made
    Rejected,
    Completed(Severity),
    Failed,
}

/// Symptom description form plus the analysis card.
#[derive(Debug, Clone, Default)]
pub struct SymptomTracker {
    pub description: String,
    pub photo: Option<PhotoUpload>,
    response: SymptomResponse,
}

impl SymptomTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn response(&self) -> &SymptomResponse {
        &self.response
    }

    /// Send the description (and photo, if any) for analysis.
    ///
    /// An empty description only sets the inline error; the previous result
    /// is left in place.
    pub async fn submit<B: CareBackend>(&mut self, backend: &B) -> AnalysisOutcome {
        if self.description.is_empty() {
            self.response.error = Some(MISSING_DESCRIPTION.to_string());
            return AnalysisOutcome::Rejected;
        }

        self.response = SymptomResponse {
            is_loading: true,
            ..SymptomResponse::default()
        };

        let report = SymptomReport {
            description: self.description.clone(),
            photo: self.photo.clone(),
        };

        match backend.analyze_symptom(report).await {
            Ok(analysis) => {
                info!("[Symptom] Analysis complete: {}", analysis.severity);
                self.response = SymptomResponse {
                    severity: Some(analysis.severity),
                    advice: analysis.advice,
                    is_loading: false,
                    error: None,
                };
                AnalysisOutcome::Completed(analysis.severity)
            }
            Err(err) => {
                info!("[Symptom] Analysis failed: {}", err.message());
                self.response = SymptomResponse {
                    error: Some(ANALYSIS_FAILED.to_string()),
                    ..SymptomResponse::default()
                };
                AnalysisOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::{Call, FakeBackend};
    use crate::error::TransportError;

    #[tokio::test]
    async fn empty_description_is_rejected_without_request() {
        let backend = FakeBackend::new();
        let mut tracker = SymptomTracker::new();

        assert_eq!(tracker.submit(&backend).await, AnalysisOutcome::Rejected);
        assert_eq!(tracker.response().error.as_deref(), Some(MISSING_DESCRIPTION));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn successful_analysis_sets_severity_and_advice() {
        let backend = FakeBackend::new();
        let mut tracker = SymptomTracker::new();
        tracker.description = "Itchy rash on my arm".to_string();
        tracker.photo = Some(PhotoUpload {
            file_name: "rash.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![0x89, 0x50],
        });

        let outcome = tracker.submit(&backend).await;

        assert_eq!(outcome, AnalysisOutcome::Completed(Severity::Mild));
        let response = tracker.response();
        assert_eq!(response.severity, Some(Severity::Mild));
        assert_eq!(response.advice, "Monitor and rest.");
        assert!(!response.is_loading);
        assert!(response.error.is_none());
        assert_eq!(
            backend.calls(),
            vec![Call::AnalyzeSymptom {
                description: "Itchy rash on my arm".to_string(),
                has_photo: true,
            }]
        );
    }

    #[tokio::test]
    async fn failed_analysis_shows_fixed_message_without_severity() {
        let backend = FakeBackend::failing(TransportError::Status { status: 502 });
        let mut tracker = SymptomTracker::new();
        tracker.description = "Headache".to_string();

        assert_eq!(tracker.submit(&backend).await, AnalysisOutcome::Failed);

        let response = tracker.response();
        assert_eq!(response.error.as_deref(), Some(ANALYSIS_FAILED));
        assert!(response.severity.is_none());
        assert!(!response.is_loading);
    }

    #[tokio::test]
    async fn rejection_keeps_previous_result() {
        let backend = FakeBackend::new();
        let mut tracker = SymptomTracker::new();
        tracker.description = "Unexpected bleeding".to_string();
        tracker.submit(&backend).await;

        tracker.description.clear();
        tracker.submit(&backend).await;

        let response = tracker.response();
        assert_eq!(response.severity, Some(Severity::Severe));
        assert_eq!(response.error.as_deref(), Some(MISSING_DESCRIPTION));
    }
}
