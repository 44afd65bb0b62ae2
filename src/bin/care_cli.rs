use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use care_companion::backend::{HttpBackend, PhotoUpload};
use care_companion::journal::{JournalView, SubmitOutcome};
use care_companion::notify::TerminalNotifier;
use care_companion::render::{render_dashboard, render_journal, render_symptom, DashboardView};
use care_companion::stimulus::StimulusEmitters;
use care_companion::symptom::{AnalysisOutcome, SymptomTracker};
use care_companion::telemetry::ConnectionStatus;
use care_companion::{AppConfig, Dashboard};
use clap::{Args, Parser, Subcommand};
use futures::StreamExt;

/// Exit code for failures the views already reported to the user.
const VIEW_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    care_companion::init_logging(cli.verbose);
    match cli.execute() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("care-cli error: {err:?}");
            ExitCode::from(1)
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "care-cli", about = "Patient dashboard client for the care backend")]
struct Cli {
    /// REST base URL (overrides CARE_API_BASE_URL).
    #[arg(long, global = true)]
    api_base: Option<String>,
    /// Websocket base URL (overrides CARE_WS_BASE_URL).
    #[arg(long, global = true)]
    ws_base: Option<String>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stream live telemetry and redraw the dashboard on every change.
    Monitor(MonitorArgs),
    /// Send a low-HRV reading as if it came from the wearable.
    Wearable,
    /// Send a clinical biomarker level, prompting for it unless --level is given.
    Lab(LabArgs),
    /// Read or write the reflection journal.
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },
    /// Ask the backend to assess a symptom.
    Symptom(SymptomArgs),
}

#[derive(Args, Debug, Clone)]
struct MonitorArgs {
    /// Stop after this many milliseconds. Runs until disconnect or Ctrl+C otherwise.
    #[arg(long)]
    watch_ms: Option<u64>,
}

#[derive(Args, Debug, Clone)]
struct LabArgs {
    /// Biomarker level to send without prompting.
    #[arg(long)]
    level: Option<f64>,
}

#[derive(Subcommand, Debug, Clone)]
enum JournalAction {
    /// Print past entries.
    List,
    /// Save a new entry, then print the journal.
    Add {
        /// Entry text.
        text: String,
    },
}

#[derive(Args, Debug, Clone)]
struct SymptomArgs {
    /// What the symptom looks or feels like.
    #[arg(long)]
    description: String,
    /// Optional photo of the affected area.
    #[arg(long)]
    photo: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> AppConfig {
        let mut config = AppConfig::load();
        if let Some(api) = &self.api_base {
            config.endpoints.api_base_url = api.clone();
        }
        if let Some(ws) = &self.ws_base {
            config.endpoints.ws_base_url = ws.clone();
        }
        config
    }

    fn execute(self) -> Result<ExitCode> {
        let config = self.config();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("building tokio runtime")?;

        runtime.block_on(async move {
            match self.command {
                Command::Monitor(args) => monitor_command(&config, args).await,
                Command::Wearable => wearable_command(&config).await,
                Command::Lab(args) => lab_command(&config, args).await,
                Command::Journal { action } => journal_command(&config, action).await,
                Command::Symptom(args) => symptom_command(&config, args).await,
            }
        })
    }
}

fn exit_for(failed: bool) -> ExitCode {
    if failed {
        ExitCode::from(VIEW_FAILURE)
    } else {
        ExitCode::SUCCESS
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

async fn monitor_command(config: &AppConfig, args: MonitorArgs) -> Result<ExitCode> {
    let dashboard =
        Dashboard::mount(&config.endpoints).context("mounting telemetry dashboard")?;
    let mut updates = dashboard.updates();

    let watch = async {
        match args.watch_ms {
            Some(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(watch);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut disconnected = false;
    loop {
        tokio::select! {
            _ = &mut watch => break,
            _ = &mut ctrl_c => break,
            next = updates.next() => match next {
                Some(state) => {
                    print_lines(&render_dashboard(&DashboardView::from_state(&state)));
                    println!();
                    if state.status == ConnectionStatus::Disconnected {
                        disconnected = true;
                        break;
                    }
                }
                None => break,
            },
        }
    }

    let stats = dashboard.unmount().await;
    println!(
        "Frames received: {}, snapshots applied: {}, decode failures: {}",
        stats.frames_received, stats.snapshots_applied, stats.decode_failures
    );
    Ok(exit_for(disconnected))
}

fn emitters(config: &AppConfig) -> Result<StimulusEmitters<HttpBackend, TerminalNotifier>> {
    let backend = HttpBackend::new(&config.endpoints).context("creating backend client")?;
    Ok(StimulusEmitters::new(
        Arc::new(backend),
        Arc::new(TerminalNotifier),
        config.emitters.clone(),
    ))
}

async fn wearable_command(config: &AppConfig) -> Result<ExitCode> {
    let emitters = emitters(config)?;
    let sent = emitters.simulate_wearable().await.is_ok();
    if sent {
        println!("Wearable reading sent (HRV {}ms)", config.emitters.wearable_hrv);
    }
    Ok(exit_for(!sent))
}

async fn lab_command(config: &AppConfig, args: LabArgs) -> Result<ExitCode> {
    let emitters = emitters(config)?;
    let sent = match args.level {
        Some(level) => emitters.submit_lab_level(level).await.map(|_| Some(level)),
        None => emitters.enter_lab_results().await,
    };
    match sent {
        Ok(Some(level)) => {
            println!("Biomarker level {level} sent");
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => {
            eprintln!("Lab entry aborted: not a number");
            Ok(exit_for(true))
        }
        Err(_) => Ok(exit_for(true)),
    }
}

async fn journal_command(config: &AppConfig, action: JournalAction) -> Result<ExitCode> {
    let backend = HttpBackend::new(&config.endpoints).context("creating backend client")?;
    let mut view = JournalView::new();
    view.load(&backend).await;

    let failed = match action {
        JournalAction::List => view.error().is_some(),
        JournalAction::Add { text } => {
            view.draft = text;
            match view.submit(&backend).await {
                SubmitOutcome::Saved => false,
                SubmitOutcome::Skipped => {
                    eprintln!("Nothing to save: entry is empty");
                    false
                }
                SubmitOutcome::Failed => true,
            }
        }
    };

    print_lines(&render_journal(&view));
    Ok(exit_for(failed))
}

async fn symptom_command(config: &AppConfig, args: SymptomArgs) -> Result<ExitCode> {
    let backend = HttpBackend::new(&config.endpoints).context("creating backend client")?;
    let mut tracker = SymptomTracker::new();
    tracker.description = args.description;
    if let Some(path) = &args.photo {
        let photo = PhotoUpload::from_path(path)
            .with_context(|| format!("reading photo {}", path.display()))?;
        tracker.photo = Some(photo);
    }

    let outcome = tracker.submit(&backend).await;
    print_lines(&render_symptom(tracker.response()));
    Ok(exit_for(!matches!(outcome, AnalysisOutcome::Completed(_))))
}
