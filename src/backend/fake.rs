//! In-memory backend for unit tests.

use std::sync::Mutex;

use crate::error::TransportError;

use super::types::{
    ClinicalPayload, HealthConnectPayload, JournalEntry, NewJournalEntry, Severity,
    SymptomAnalysis, SymptomReport,
};
use super::CareBackend;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    HealthConnect(f64),
    Clinical(f64),
    ListJournal,
    CreateJournal(String),
    AnalyzeSymptom { description: String, has_photo: bool },
}

/// Records every call and answers from canned data, or fails every call
/// once `fail_with` is set.
pub(crate) struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    fail_with: Mutex<Option<TransportError>>,
    journal: Mutex<Vec<JournalEntry>>,
    next_id: Mutex<i64>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Mutex::new(None),
            journal: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    pub(crate) fn failing(err: TransportError) -> Self {
        let backend = Self::new();
        *backend.fail_with.lock().unwrap() = Some(err);
        backend
    }

    pub(crate) fn with_journal(entries: Vec<JournalEntry>) -> Self {
        let backend = Self::new();
        *backend.next_id.lock().unwrap() = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        *backend.journal.lock().unwrap() = entries;
        backend
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), TransportError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

pub(crate) fn entry(id: i64, content: &str) -> JournalEntry {
    JournalEntry {
        id,
        content: content.to_string(),
        timestamp: "2024-05-01T08:30:00".to_string(),
        ai_encouragement: Some("You're doing great.".to_string()),
    }
}

impl CareBackend for FakeBackend {
    async fn send_health_connect(&self, payload: HealthConnectPayload) -> Result<(), TransportError> {
        self.record(Call::HealthConnect(payload.hrv))
    }

    async fn send_clinical(&self, payload: ClinicalPayload) -> Result<(), TransportError> {
        self.record(Call::Clinical(payload.biomarker_level))
    }

    async fn list_journal(&self) -> Result<Vec<JournalEntry>, TransportError> {
        self.record(Call::ListJournal)?;
        Ok(self.journal.lock().unwrap().clone())
    }

    async fn create_journal_entry(
        &self,
        new_entry: NewJournalEntry,
    ) -> Result<JournalEntry, TransportError> {
        self.record(Call::CreateJournal(new_entry.content.clone()))?;
        let mut next_id = self.next_id.lock().unwrap();
        let stored = entry(*next_id, &new_entry.content);
        *next_id += 1;
        self.journal.lock().unwrap().insert(0, stored.clone());
        Ok(stored)
    }

    async fn analyze_symptom(&self, report: SymptomReport) -> Result<SymptomAnalysis, TransportError> {
        self.record(Call::AnalyzeSymptom {
            description: report.description.clone(),
            has_photo: report.photo.is_some(),
        })?;
        let severity = if report.description.contains("bleeding") {
            Severity::Severe
        } else {
            Severity::Mild
        };
        Ok(SymptomAnalysis {
            severity,
            advice: "Monitor and rest.".to_string(),
        })
    }
}
