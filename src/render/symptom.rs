use crate::symptom::SymptomResponse;

/// Text rendering of the analysis card. Empty when there is nothing to show.
pub fn render_symptom(response: &SymptomResponse) -> Vec<String> {
    if response.is_loading {
        return vec!["Communicating with AI assistant...".to_string()];
    }

    let mut lines = Vec::new();
    if let Some(error) = &response.error {
        lines.push("Oops!".to_string());
        lines.push(error.clone());
    }
    if let Some(severity) = response.severity {
        lines.push("AI Analysis Complete".to_string());
        lines.push(format!("Severity: {}", severity));
        lines.push(format!("Recommended Action: {}", response.advice));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Severity;

    #[test]
    fn loading_hides_everything_else() {
        let response = SymptomResponse {
            is_loading: true,
            error: Some("stale".to_string()),
            ..SymptomResponse::default()
        };
        assert_eq!(render_symptom(&response), vec!["Communicating with AI assistant..."]);
    }

    #[test]
    fn completed_analysis_lists_severity_and_advice() {
        let response = SymptomResponse {
            severity: Some(Severity::Moderate),
            advice: "See a GP within a week.".to_string(),
            ..SymptomResponse::default()
        };
        assert_eq!(
            render_symptom(&response),
            vec![
                "AI Analysis Complete",
                "Severity: Moderate",
                "Recommended Action: See a GP within a week.",
            ]
        );
    }

    #[test]
    fn error_is_shown_under_heading() {
        let response = SymptomResponse {
            error: Some("Failed to get analysis.".to_string()),
            ..SymptomResponse::default()
        };
        assert_eq!(render_symptom(&response), vec!["Oops!", "Failed to get analysis."]);
    }

    #[test]
    fn idle_response_renders_nothing() {
        assert!(render_symptom(&SymptomResponse::default()).is_empty());
    }
}
