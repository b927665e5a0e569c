//! Terminal UI for looking up waste-collection areas and pickup schedules.

mod app;
mod input;
mod ui;

use std::{io, path::PathBuf, sync::Arc, time::Duration as StdDuration};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::EnvFilter;
use tunna_core::service::DisposalService;
use tunna_loader::load_catalog;

use crate::app::App;
use crate::input::Action;

#[derive(Debug, Parser)]
#[command(name = "tunna", about = "Municipal waste collection lookup")]
struct Args {
    /// Disposal reference data: a directory of delimited sheet files or a
    /// single delimited file.
    data: PathBuf,

    /// Optional address-registry enrichment file.
    #[arg(long)]
    info: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Log to stderr; only visible when redirected, the TUI owns the screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Build the catalog before touching the terminal so load errors print
    // as plain messages. A failed load means no service at all.
    let catalog = load_catalog(&args.data, args.info.as_deref())
        .with_context(|| format!("loading reference data from {}", args.data.display()))?;
    let service = DisposalService::new(Arc::new(catalog));

    // App state
    let app = App::new(service);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::RefreshSuggestions => app.refresh_suggestions(),
                Action::AcceptSuggestion => app.accept_current_suggestion(),
                Action::LookupAddress => {
                    let query_text = app.address_input.trim();
                    if query_text.is_empty() {
                        app.error_message = Some(
                            "Type a street plus house number, then press Enter".into(),
                        );
                        continue;
                    }
                    app.lookup_current();
                }
            }
        }
    }

    Ok(())
}
