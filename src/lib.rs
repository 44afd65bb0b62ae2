//! Care Companion - patient dashboard client
//!
//! Live treatment-progress telemetry over a websocket, stimulus emitters that
//! feed synthetic readings to the backend, and the journal and symptom views.
//! All scoring and analysis happens in the backend; this crate only moves
//! data and formats it.

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod journal;
pub mod notify;
pub mod render;
pub mod stimulus;
pub mod symptom;
pub mod telemetry;

pub use config::AppConfig;
pub use dashboard::Dashboard;

use tracing::Level;

/// Install the fmt subscriber on stderr. `log` records are bridged into it.
///
/// `verbosity` counts `-v` flags: 0 is warn, 1 info, 2 debug, 3+ trace.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
