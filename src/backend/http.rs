use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::config::{paths, EndpointConfig};
use crate::error::{log_transport_error, TransportError};

use super::types::{
    ClinicalPayload, HealthConnectPayload, JournalEntry, NewJournalEntry, SymptomAnalysis,
    SymptomReport,
};
use super::CareBackend;

/// Resolved REST endpoints.
#[derive(Debug, Clone)]
struct BackendUrls {
    health_connect: Url,
    clinical: Url,
    journal: Url,
    symptom_analysis: Url,
}

/// `reqwest`-backed implementation of [`CareBackend`].
///
/// No request timeout is set: an unresponsive backend leaves the call
/// pending until the connection itself fails.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    urls: BackendUrls,
}

impl HttpBackend {
    pub fn new(endpoints: &EndpointConfig) -> Result<Self, TransportError> {
        let urls = BackendUrls {
            health_connect: endpoints.http_url(paths::HEALTH_CONNECT_DATA)?,
            clinical: endpoints.http_url(paths::CLINICAL_DATA)?,
            journal: endpoints.http_url(paths::JOURNAL)?,
            symptom_analysis: endpoints.http_url(paths::SYMPTOM_ANALYSIS)?,
        };
        let http = Client::builder()
            .build()
            .map_err(|err| TransportError::Request {
                reason: format!("failed to build HTTP client: {err}"),
            })?;
        Ok(Self { http, urls })
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &Url,
        body: &T,
    ) -> Result<reqwest::Response, TransportError> {
        let response = self.http.post(url.clone()).json(body).send().await?;
        Ok(response.error_for_status()?)
    }
}

impl CareBackend for HttpBackend {
    async fn send_health_connect(&self, payload: HealthConnectPayload) -> Result<(), TransportError> {
        self.post_json(&self.urls.health_connect, &payload)
            .await
            .map(|_| ())
            .inspect_err(|err| log_transport_error(err, "send_health_connect"))
    }

    async fn send_clinical(&self, payload: ClinicalPayload) -> Result<(), TransportError> {
        self.post_json(&self.urls.clinical, &payload)
            .await
            .map(|_| ())
            .inspect_err(|err| log_transport_error(err, "send_clinical"))
    }

    async fn list_journal(&self) -> Result<Vec<JournalEntry>, TransportError> {
        let result = async {
            let response = self
                .http
                .get(self.urls.journal.clone())
                .send()
                .await?
                .error_for_status()?;
            Ok::<_, TransportError>(response.json::<Vec<JournalEntry>>().await?)
        }
        .await;
        result.inspect_err(|err| log_transport_error(err, "list_journal"))
    }

    async fn create_journal_entry(
        &self,
        entry: NewJournalEntry,
    ) -> Result<JournalEntry, TransportError> {
        let result = async {
            let response = self.post_json(&self.urls.journal, &entry).await?;
            Ok::<_, TransportError>(response.json::<JournalEntry>().await?)
        }
        .await;
        result.inspect_err(|err| log_transport_error(err, "create_journal_entry"))
    }

    async fn analyze_symptom(&self, report: SymptomReport) -> Result<SymptomAnalysis, TransportError> {
        let result = async {
            let mut form = Form::new().text("description", report.description);
            if let Some(photo) = report.photo {
                let part = Part::bytes(photo.bytes)
                    .file_name(photo.file_name)
                    .mime_str(&photo.mime)?;
                form = form.part("photo", part);
            }

            let response = self
                .http
                .post(self.urls.symptom_analysis.clone())
                .multipart(form)
                .send()
                .await?
                .error_for_status()?;
            Ok::<_, TransportError>(response.json::<SymptomAnalysis>().await?)
        }
        .await;
        result.inspect_err(|err| log_transport_error(err, "analyze_symptom"))
    }
}
