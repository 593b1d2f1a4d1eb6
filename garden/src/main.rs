//! Reflective journaling garden TUI.
//!
//! Answer a prompt to plant a seed, then return to the plant to answer
//! gentle follow-up questions and watch it grow.
//!
//! ```bash
//! cargo run -p garden -- --data-dir ~/.garden
//! ```

mod app;
mod events;
mod logging;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use garden_core::session::DEFAULT_DATA_DIR;
use garden_core::{FollowUpGenerator, FollowUpRequest, GardenSession, SessionConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use app::{App, FollowUpReady};
use events::{handle_event, EventResult};
use ui::render::render;

/// Yalom's Garden: a reflective journaling garden in your terminal.
#[derive(Parser, Debug)]
#[command(name = "garden", version, about)]
struct Args {
    /// Directory holding the garden and its logs.
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Gemini model used for follow-up questions.
    #[arg(long)]
    model: Option<String>,

    /// Never call Gemini; use the built-in follow-up questions.
    #[arg(long)]
    offline: bool,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::from_env(&self.data_dir);
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if self.offline {
            config = config.offline();
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let _log_guard = match logging::init(&args.data_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e}");
            None
        }
    };
    tracing::info!(data_dir = %args.data_dir.display(), offline = args.offline, "starting garden");

    let session = GardenSession::open(args.session_config()).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(session)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "garden exited with an error");
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Ask for a follow-up on a background task so the UI keeps drawing.
fn spawn_follow_up(
    generator: Arc<dyn FollowUpGenerator>,
    request: u64,
    follow_up: FollowUpRequest,
    tx: mpsc::UnboundedSender<FollowUpReady>,
) {
    tokio::spawn(async move {
        let question = follow_up.run(generator.as_ref()).await;
        // The receiver is gone only when the app is shutting down.
        let _ = tx.send(FollowUpReady {
            plant_id: follow_up.plant_id,
            request,
            question,
        });
    });
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    let (follow_up_tx, mut follow_up_rx) = mpsc::unbounded_channel();

    loop {
        // Render
        terminal.draw(|f| render(f, &app))?;

        // Process any pending plant or reflection
        if app.pending_action.is_some() {
            app.run_pending().await;
            continue;
        }

        if let Some((request, follow_up)) = app.pending_follow_up.take() {
            spawn_follow_up(app.session.generator(), request, follow_up, follow_up_tx.clone());
        }

        while let Ok(ready) = follow_up_rx.try_recv() {
            app.receive_follow_up(ready);
        }

        // Poll for events with timeout for animations
        if event::poll(Duration::from_millis(100))? {
            match handle_event(&mut app, event::read()?) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            app.tick();
        }
    }
}
