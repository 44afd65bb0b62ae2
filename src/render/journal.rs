use chrono::{DateTime, Local, NaiveDateTime};

use crate::journal::JournalView;

/// Display form of a backend timestamp, in local time when it carries an
/// offset. Unparsable values are shown as received.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(DISPLAY).to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => naive.format(DISPLAY).to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn render_journal(view: &JournalView) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(error) = view.error() {
        lines.push(format!("Error: {}", error));
    }
    lines.push("Past Entries".to_string());

    if view.is_loading() {
        lines.push("Loading entries...".to_string());
        return lines;
    }
    if view.entries().is_empty() {
        lines.push("No entries yet.".to_string());
        lines.push("Your first one will appear here.".to_string());
        return lines;
    }

    for entry in view.entries() {
        lines.push(String::new());
        lines.push(format!("[{}]", format_timestamp(&entry.timestamp)));
        lines.extend(entry.content.lines().map(|line| format!("  {}", line)));
        if let Some(encouragement) = entry.ai_encouragement.as_deref().filter(|e| !e.is_empty()) {
            lines.push(format!("  ~ {}", encouragement));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::{entry, FakeBackend};

    #[test]
    fn naive_timestamps_are_reformatted() {
        assert_eq!(format_timestamp("2024-05-01T08:30:00"), "2024-05-01 08:30:00");
        assert_eq!(
            format_timestamp("2024-05-01T08:30:00.123456"),
            "2024-05-01 08:30:00"
        );
    }

    #[test]
    fn unparsable_timestamp_is_kept_verbatim() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn loading_view_shows_placeholder() {
        let lines = render_journal(&JournalView::new());
        assert_eq!(lines, vec!["Past Entries", "Loading entries..."]);
    }

    #[tokio::test]
    async fn entries_render_with_encouragement() {
        let backend = FakeBackend::with_journal(vec![entry(1, "Slept well\nWalked 2km")]);
        let mut view = JournalView::new();
        view.load(&backend).await;

        let lines = render_journal(&view);

        assert!(lines.contains(&"[2024-05-01 08:30:00]".to_string()));
        assert!(lines.contains(&"  Slept well".to_string()));
        assert!(lines.contains(&"  Walked 2km".to_string()));
        assert!(lines.contains(&"  ~ You're doing great.".to_string()));
    }

    #[tokio::test]
    async fn empty_journal_invites_first_entry() {
        let backend = FakeBackend::new();
        let mut view = JournalView::new();
        view.load(&backend).await;

        let lines = render_journal(&view);
        assert_eq!(lines.last().map(String::as_str), Some("Your first one will appear here."));
    }
}
