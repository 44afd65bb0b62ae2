//! Backend abstractions for the care companion client.
//!
//! Every view talks to the backend through [`CareBackend`], so views and
//! emitters can be exercised against an in-memory fake while the CLI uses
//! [`HttpBackend`].

use std::future::Future;

use crate::error::TransportError;

mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpBackend;
pub use types::{
    ClinicalPayload, HealthConnectPayload, JournalEntry, NewJournalEntry, PhotoUpload, Severity,
    SymptomAnalysis, SymptomReport,
};

/// Operations the client performs against the care backend.
///
/// No operation retries. Any non-2xx status is a [`TransportError::Status`].
pub trait CareBackend: Send + Sync {
    /// POST `/api/health-connect-data`
    fn send_health_connect(
        &self,
        payload: HealthConnectPayload,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// POST `/api/clinical-data`
    fn send_clinical(
        &self,
        payload: ClinicalPayload,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// GET `/api/journal`, newest first as ordered by the server
    fn list_journal(&self) -> impl Future<Output = Result<Vec<JournalEntry>, TransportError>> + Send;

    /// POST `/api/journal`, returning the stored entry
    fn create_journal_entry(
        &self,
        entry: NewJournalEntry,
    ) -> impl Future<Output = Result<JournalEntry, TransportError>> + Send;

    /// POST `/api/symptom-analysis` (multipart)
    fn analyze_symptom(
        &self,
        report: SymptomReport,
    ) -> impl Future<Output = Result<SymptomAnalysis, TransportError>> + Send;
}
