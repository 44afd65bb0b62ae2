//! Request and response payloads exchanged with the care backend.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Wearable reading pushed by the companion app simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HealthConnectPayload {
    pub hrv: f64,
}

/// Manually entered lab result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClinicalPayload {
    pub biomarker_level: f64,
}

/// Stored journal entry as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: i64,
    pub content: String,
    /// ISO-8601 timestamp, kept verbatim and formatted only for display
    pub timestamp: String,
    #[serde(default)]
    pub ai_encouragement: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewJournalEntry {
    pub content: String,
}

/// Severity grade assigned by the symptom analysis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomAnalysis {
    pub severity: Severity,
    pub advice: String,
}

/// Photo attached to a symptom report.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// Read a photo from disk, guessing the MIME type from its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("photo")
            .to_string();
        Ok(Self {
            mime: mime_for(path).to_string(),
            file_name,
            bytes,
        })
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Multipart body for `/api/symptom-analysis`.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomReport {
    pub description: String,
    pub photo: Option<PhotoUpload>,
}
