//! Screen mode for the drawing surface: raw input, alternate screen, mouse
//! reporting and a hidden cursor. Leaving the mode happens exactly once,
//! whichever comes first of drop, an explicit restore, or a termination
//! signal.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub trait ScreenMode: Send + Sync + 'static {
    fn enter(&self) -> io::Result<()>;
    fn leave(&self) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct CrosstermScreen;

impl ScreenMode for CrosstermScreen {
    fn enter(&self) -> io::Result<()> {
        use crossterm::cursor::Hide;
        use crossterm::event::EnableMouseCapture;
        use crossterm::terminal::{self, EnterAlternateScreen};

        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)
    }

    /// Runs every step even after a failure and reports the first error.
    fn leave(&self) -> io::Result<()> {
        use crossterm::cursor::Show;
        use crossterm::event::DisableMouseCapture;
        use crossterm::terminal::{self, LeaveAlternateScreen};

        let raw = terminal::disable_raw_mode();
        let screen =
            crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
        raw.and(screen)
    }
}

/// Shareable handle that leaves the screen mode at most once.
#[derive(Clone)]
pub struct RestoreHandle {
    left: Arc<AtomicBool>,
    mode: Arc<dyn ScreenMode>,
}

impl RestoreHandle {
    pub fn is_restored(&self) -> bool {
        self.left.load(Ordering::SeqCst)
    }

    pub fn restore(&self) -> io::Result<()> {
        if self.left.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.mode.leave()
    }
}

pub struct TerminalGuard {
    handle: RestoreHandle,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_mode(Arc::new(CrosstermScreen))
    }

    /// Enters `mode`; nothing is restored if entering fails.
    pub fn with_mode(mode: Arc<dyn ScreenMode>) -> io::Result<Self> {
        mode.enter()?;
        let handle = RestoreHandle {
            left: Arc::new(AtomicBool::new(false)),
            mode,
        };
        Ok(Self { handle })
    }

    pub fn handle(&self) -> RestoreHandle {
        self.handle.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.handle.restore() {
            tracing::warn!(error = %e, "terminal not restored");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
}

impl TerminationSignal {
    #[cfg(unix)]
    fn from_raw(signo: i32) -> Option<Self> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};
        match signo {
            SIGINT => Some(Self::Interrupt),
            SIGTERM => Some(Self::Terminate),
            _ => None,
        }
    }

    /// Shell convention: `128 + signo`.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Interrupt => 130,
            Self::Terminate => 143,
        }
    }
}

/// Forwards SIGINT/SIGTERM to `tx`. If the main loop has not exited within
/// the grace period, the screen is restored and the process exits.
#[cfg(unix)]
pub fn watch_termination_signals(
    handle: RestoreHandle,
    tx: std::sync::mpsc::Sender<TerminationSignal>,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    const GRACE: std::time::Duration = std::time::Duration::from_secs(2);

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    Ok(std::thread::spawn(move || {
        let Some(signal) = signals.forever().find_map(TerminationSignal::from_raw) else {
            return;
        };
        tracing::warn!(?signal, "termination signal received");
        if tx.send(signal).is_err() {
            tracing::debug!("main loop already gone");
        }
        std::thread::sleep(GRACE);
        let _ = handle.restore();
        std::process::exit(signal.exit_code());
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
