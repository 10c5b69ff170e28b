use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::Cli;
use crate::audio::RodioBackend;
use crate::catalog::{CatalogClient, CatalogWorker};
use crate::session::{PlayerSession, SessionOptions};

mod event_loop;
mod logging;
mod prompt;
mod settings;
mod startup;

pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (settings, warning) = settings::load_settings(cli.server.as_deref());

    match logging::init_logging(&settings.log) {
        Ok(path) => log::info!("cantor starting, logging to {}", path.display()),
        Err(e) => eprintln!("cantor: logging disabled: {e}"),
    }
    if let Some(warning) = warning {
        log::warn!("{warning}");
    }

    let client = CatalogClient::new(&settings.server)?;
    let (worker, replies) = CatalogWorker::new(client);
    let (media, media_events) = RodioBackend::spawn(worker.client(), &settings.audio);
    let mut session = PlayerSession::new(media, worker, SessionOptions::from_settings(&settings));

    let mut state = event_loop::EventLoopState::default();
    if startup::apply_launch_args(&mut session, &cli) {
        state.prompt.open();
    }

    enable_raw_mode()?;
    let mut terminal = match enter_terminal() {
        Ok(t) => t,
        Err(e) => {
            let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    };

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut session,
        &replies,
        &media_events,
        &mut state,
    );

    session.close();
    log::info!("cantor exiting");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

fn enter_terminal() -> std::io::Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}
