//! Blocking user notifications used by the stimulus emitters.
//!
//! The [`Notifier`] trait lets the CLI talk to the terminal while tests
//! script the answers.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

/// Blocking, user-facing notification channel.
///
/// Both calls may block on the user. Async callers run [`prompt`] on the
/// blocking pool with `tokio::task::spawn_blocking`.
///
/// [`prompt`]: Notifier::prompt
pub trait Notifier: Send + Sync {
    /// Show a message the user has to see.
    fn alert(&self, message: &str);

    /// Ask for a single line of input, pre-filled with `default`.
    ///
    /// Returns `None` if the user cancels.
    fn prompt(&self, message: &str, default: &str) -> Option<String>;
}

/// Notifier writing to stderr and reading answers from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }

    fn prompt(&self, message: &str, default: &str) -> Option<String> {
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "? {} [{}] ", message, default);
        let _ = stderr.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            // EOF counts as cancel
            Ok(0) => None,
            Ok(_) => {
                let answer = line.trim_end_matches(['\r', '\n']);
                if answer.is_empty() {
                    Some(default.to_string())
                } else {
                    Some(answer.to_string())
                }
            }
            Err(err) => {
                log::warn!("[Notify] Failed to read prompt answer: {}", err);
                None
            }
        }
    }
}

/// Notifier that records alerts and replays scripted prompt answers.
///
/// Once the script is exhausted every prompt is treated as cancelled.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
    answers: Mutex<VecDeque<Option<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers for upcoming prompts, in order.
    pub fn with_answers<I>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .map(|alerts| alerts.clone())
            .unwrap_or_default()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }

    fn prompt(&self, message: &str, _default: &str) -> Option<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(message.to_string());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .flatten()
    }
}
