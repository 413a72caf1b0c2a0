use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::warn;

use bounty_progress::{
    progression::ProgressTracker,
    tui::{ui, App, AppAction, Event as TuiEvent, EventHandler},
};

pub async fn run_tui(tracker: ProgressTracker) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(*tracker.calculator());
    let mut events = EventHandler::new(250);

    terminal.clear()?;

    let res = run_app(&mut terminal, &mut app, &mut events, &tracker).await;

    // Always restore terminal state, even if there was an error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Application error: {}", err);
        Err(err)
    } else {
        Ok(())
    }
}

async fn load_rows(tracker: &ProgressTracker, app: &mut App) {
    match tracker.leaderboard().await {
        Ok(rows) => app.set_rows(rows),
        Err(e) => {
            warn!("Failed to load profiles: {}", e);
            app.set_error(&e.to_string());
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut EventHandler,
    tracker: &ProgressTracker,
) -> Result<()> {
    terminal.draw(|f| ui::draw(f, app))?;
    load_rows(tracker, app).await;

    loop {
        if app.should_quit {
            return Ok(());
        }

        terminal.draw(|f| ui::draw(f, app))?;

        match events.next().await {
            Some(TuiEvent::Key(key)) => {
                if app.handle_key(key) == AppAction::Refresh {
                    terminal.draw(|f| ui::draw(f, app))?;
                    load_rows(tracker, app).await;
                }
            }
            Some(TuiEvent::Resize(_, _)) | Some(TuiEvent::Tick) => {}
            None => return Err(anyhow::anyhow!("Terminal event stream closed")),
        }
    }
}
