use anyhow::Context as _;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io::stdout,
    time::{Duration, Instant},
};
use tracing::info;

use blockfall::{constants::INPUT_POLL_INTERVAL, game::Session};

mod cli;
mod input;
mod ui;

use cli::Args;
use input::{handle_input, Control, InputState};
use ui::ui;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    cli::init_logging(&args)?;

    let mut session = Session::new(args.game_config()).context("invalid game configuration")?;

    // Setup terminal
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session);

    // Cleanup, even when the game loop failed
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    if session.is_lost() {
        println!("Game over! Final score: {}", session.score());
    }
    Ok(())
}

fn run<B: Backend>(terminal: &mut Terminal<B>, session: &mut Session) -> anyhow::Result<()> {
    let tick_interval = session.config().tick_interval();
    let mut input = InputState::new();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, &session.view()))?;

        if event::poll(Duration::from_millis(INPUT_POLL_INTERVAL))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                match handle_input(&mut input, code, kind) {
                    Some(Control::Quit) => {
                        info!(score = session.score(), "quit");
                        break;
                    }
                    Some(Control::Restart) if session.is_lost() => {
                        session.restart();
                        input.clear();
                        last_tick = Instant::now();
                    }
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_interval {
            last_tick = Instant::now();
            session.tick(input.take());
        }
    }

    Ok(())
}
