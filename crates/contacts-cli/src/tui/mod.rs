//! Contacts TUI
//!
//! Terminal interface over the contact service.
//!
//! ## Layout
//!
//! - Left: Add/edit form
//! - Right: Contact list, newest first
//! - Bottom: Status bar with the latest notice or key hints
//!
//! ## Keys
//!
//! - Tab: Switch between form and list
//! - Form: ↑/↓ change field, Enter save, Esc cancel edit
//! - List: j/k move, Enter show message, e edit, d delete, q quit
//!
//! Service calls run as background tasks and report back over a channel,
//! so the UI keeps drawing while a request is in flight.

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::EnvFilter;

use contacts_core::{ApiError, Config, Contact, ContactApi};

use app::{Action, App};

use crate::client::{MutationBus, SyncLoop};

/// Results of background service calls
enum TaskResult {
    Submitted(Result<Contact, ApiError>),
    Deleted(Result<(), ApiError>),
}

/// Run the TUI application
pub async fn run(api: Arc<dyn ContactApi>, config: &Config) -> Result<()> {
    init_tui_logging(config);

    let bus = MutationBus::new();
    let (sync, mut snapshots) = SyncLoop::new(Arc::clone(&api), &bus);
    let sync_task = sync.spawn();

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new();
    let result = run_app(&mut terminal, &mut app, api, &bus, &mut snapshots).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    sync_task.abort();
    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    api: Arc<dyn ContactApi>,
    bus: &MutationBus,
    snapshots: &mut watch::Receiver<Vec<Contact>>,
) -> Result<()> {
    let (result_tx, mut result_rx) = mpsc::unbounded_channel();

    loop {
        app.check_notice_timeout();

        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::select! {
            biased;

            Some(result) = result_rx.recv() => {
                let mutation = match result {
                    TaskResult::Submitted(result) => app.on_submitted(result),
                    TaskResult::Deleted(result) => app.on_deleted(result),
                };
                if let Some(mutation) = mutation {
                    bus.publish(mutation);
                }
            }

            Ok(()) = snapshots.changed() => {
                let contacts = snapshots.borrow_and_update().clone();
                app.apply_snapshot(contacts);
            }

            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                // Check for terminal events (non-blocking)
                if event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if let Some(action) = app.handle_key(key) {
                            spawn_action(action, Arc::clone(&api), result_tx.clone());
                        }
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn spawn_action(
    action: Action,
    api: Arc<dyn ContactApi>,
    result_tx: mpsc::UnboundedSender<TaskResult>,
) {
    tokio::spawn(async move {
        let result = match action {
            Action::Submit(request) => TaskResult::Submitted(request.send(api.as_ref()).await),
            Action::Delete(id) => TaskResult::Deleted(api.delete(id).await),
        };
        // The UI may already have quit
        let _ = result_tx.send(result);
    });
}

/// Log to a file, only when CONTACTS_LOG is set
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("CONTACTS_LOG") else {
        return;
    };

    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "contacts_core={},contacts_cli={}",
        log_level, log_level
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
