//! Pure view models and text renderers for the dashboard, journal and
//! symptom views.

pub mod dashboard;
pub mod journal;
pub mod symptom;

pub use dashboard::{gauge_value, render_dashboard, DashboardView, GaugeTone, INSIGHT_PLACEHOLDER};
pub use journal::{format_timestamp, render_journal};
pub use symptom::render_symptom;

/// Placeholder for any value the latest snapshot did not carry.
pub const NOT_AVAILABLE: &str = "N/A";

pub(crate) fn fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => NOT_AVAILABLE.to_string(),
    }
}
