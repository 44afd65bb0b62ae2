use crate::dashboard::ViewState;
use crate::telemetry::ConnectionStatus;

use super::{fixed, NOT_AVAILABLE};

pub const INSIGHT_PLACEHOLDER: &str = "Awaiting live data from server...";

/// Colour band of the progress gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeTone {
    Excellent,
    Good,
    Fair,
    Low,
}

impl GaugeTone {
    pub fn for_value(value: u8) -> Self {
        match value {
            v if v > 80 => GaugeTone::Excellent,
            v if v > 50 => GaugeTone::Good,
            v if v > 30 => GaugeTone::Fair,
            _ => GaugeTone::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GaugeTone::Excellent => "Excellent",
            GaugeTone::Good => "Good",
            GaugeTone::Fair => "Fair",
            GaugeTone::Low => "Low",
        }
    }
}

/// Gauge position for a progress score, 0..=100.
pub fn gauge_value(score: Option<f64>) -> u8 {
    match score {
        Some(s) if !s.is_nan() => s.clamp(0.0, 100.0).round() as u8,
        _ => 0,
    }
}

/// Everything the monitoring dashboard displays, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub status: ConnectionStatus,
    pub gauge: u8,
    pub tone: GaugeTone,
    pub insight: String,
    pub hrv: String,
    pub sentiment: String,
    pub symptom_score: String,
    pub biomarker: String,
}

impl DashboardView {
    pub fn from_state(state: &ViewState) -> Self {
        let snapshot = &state.snapshot;
        let gauge = gauge_value(snapshot.progress_score);
        Self {
            status: state.status,
            gauge,
            tone: GaugeTone::for_value(gauge),
            insight: snapshot
                .insight
                .clone()
                .filter(|insight| !insight.is_empty())
                .unwrap_or_else(|| INSIGHT_PLACEHOLDER.to_string()),
            hrv: snapshot
                .hrv
                .map(|v| format!("{:.0}ms", v))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            sentiment: fixed(snapshot.avg_sentiment, 2),
            symptom_score: fixed(snapshot.symptom_score, 1),
            biomarker: fixed(snapshot.clinical_biomarker, 1),
        }
    }
}

/// Text rendering of the dashboard, one line per widget.
pub fn render_dashboard(view: &DashboardView) -> Vec<String> {
    vec![
        format!("Status: {}", view.status.label()),
        format!("Progress Score: {} ({})", view.gauge, view.tone.label()),
        format!("AI Insight: {}", view.insight),
        format!("HRV: {}", view.hrv),
        format!("Avg Sentiment: {}", view.sentiment),
        format!("Symptom Score: {}", view.symptom_score),
        format!("Biomarker Level: {}", view.biomarker),
    ]
}
