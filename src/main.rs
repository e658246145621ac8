use std::io;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chemdraw::app::{App, DrawError, FrameLoop};
use chemdraw::models::PeriodicTable;
use chemdraw::services::{ensure_settings_file, load_settings};
use chemdraw::tui::crossterm::into_input_event;
use chemdraw::tui::terminal_guard::{TerminalGuard, TerminationSignal};
use chemdraw::ui::backend::terminal::RatatuiTerminal;
use crossterm::event;

mod logging;

const FRAME_BUDGET: Duration = Duration::from_millis(16);

fn main() -> io::Result<()> {
    let _logging = logging::init();

    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "settings file not created");
    }
    let settings = load_settings().unwrap_or_default();
    let table = PeriodicTable::embedded()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    tracing::info!(elements = table.len(), "periodic table loaded");

    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel::<TerminationSignal>();
    #[cfg(unix)]
    let _signals =
        chemdraw::tui::terminal_guard::watch_termination_signals(guard.handle(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = RatatuiTerminal::new(io::stdout())?;
    let mut app = App::new(&settings, Rc::new(table));
    let mut frames = FrameLoop::new();
    let start = Instant::now();

    let result = run(&mut app, &mut frames, &mut terminal, start, &signal_rx);
    drop(guard);
    if let Err(e) = &result {
        tracing::error!(error = %e, "exiting after error");
    }
    result
}

fn run(
    app: &mut App,
    frames: &mut FrameLoop,
    terminal: &mut RatatuiTerminal,
    start: Instant,
    signals: &mpsc::Receiver<TerminationSignal>,
) -> io::Result<()> {
    loop {
        if let Ok(signal) = signals.try_recv() {
            tracing::info!(?signal, "shutting down");
            return Ok(());
        }

        if let Err(e) = frames.frame(app, start.elapsed(), terminal) {
            if matches!(e, DrawError::Surface(_)) {
                wait_for_key()?;
            }
            return Err(io::Error::other(e));
        }

        if event::poll(FRAME_BUDGET)? {
            if let Some(input) = into_input_event(event::read()?) {
                app.handle_event(input);
            }
        }
        app.tick();

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Keeps the error screen up until any key is pressed.
fn wait_for_key() -> io::Result<()> {
    loop {
        if let event::Event::Key(_) = event::read()? {
            return Ok(());
        }
    }
}
