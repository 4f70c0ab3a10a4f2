use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use klondike_rs::config::Config;
use klondike_rs::game::Game;
use klondike_rs::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    if let Err(err) = klondike_rs::logging::init(&config) {
        eprintln!("logging disabled: {err}");
    }
    tracing::info!(version = klondike_rs::VERSION, seed = ?config.seed(), "starting");

    // Without a TTY fall back to the plain line loop (pipes, scripts, dumb terminals)
    if !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        let mut game = config.seed().map(Game::with_seed).unwrap_or_default();
        klondike_rs::cli::run_lines(&mut game, io::stdin().lock(), io::stdout().lock())?;
        return Ok(());
    }

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(250);
    let mut app = AppState::new(&config);

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res?;
    Ok(())
}
