use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioBackend;
use crate::library::ScanEvent;
use crate::player::{BackendMessage, Controller, Notice};

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = logging::init();
    let (settings, config_problem) = settings::load_settings();
    info!(log = ?log_file, "starting tangerine");

    let (event_tx, event_rx) = mpsc::channel::<BackendMessage>();
    let (scan_tx, scan_rx) = mpsc::channel::<ScanEvent>();

    // Open the output device before touching the terminal so a missing
    // device is reported on a normal screen.
    let backend = RodioBackend::spawn(event_tx)?;
    let mut controller = Controller::new(backend, settings.library.clone());

    startup::apply_playback_defaults(&mut controller, &settings);
    startup::restore_playlist(&mut controller, &settings);
    for arg in env::args_os().skip(1).map(PathBuf::from) {
        startup::open_path(&arg, &mut controller, &settings.library, &scan_tx);
    }
    if let Some(msg) = config_problem {
        controller.notify(Notice::warning(msg));
    }

    let mut app = App::new(true);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let inbox = event_loop::Inbox {
        backend: &event_rx,
        scans: &scan_rx,
        scan_tx: &scan_tx,
    };
    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut controller, &inbox);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = startup::save_playlist(&controller, &settings) {
        warn!(error = %e, "cannot save playlist");
        eprintln!("tangerine: could not save playlist: {e}");
    }
    info!("shutting down");

    run_result
}
