mod app;
mod config;
mod error;
mod login;
mod router;
mod task;
mod ui;

use app::App;
use config::Config;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use task::DemoTasks;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Logs go to a file so they never land on the drawn screen. Nothing is
/// installed unless `RUST_LOG` is set.
fn init_logging() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().ok()?;
    let appender = tracing_appender::rolling::never(std::env::temp_dir(), "techub.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

/// Puts the terminal back in cooked mode on the main screen.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)?;
    Ok(())
}

/// Runs its restore function when dropped, whether the scope ends normally,
/// through `?` or by unwinding.
struct RestoreOnDrop<F: FnMut() -> io::Result<()>>(F);

impl<F: FnMut() -> io::Result<()>> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        if let Err(err) = (self.0)() {
            tracing::error!(%err, "failed to restore terminal");
        }
    }
}

/// Restores the terminal before the default hook prints the panic message.
fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        hook(info);
    }));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _log_guard = init_logging();
    let config = Config::default();
    install_panic_hook();

    // Terminal setup
    enable_raw_mode()?;
    let _restore = RestoreOnDrop(restore_terminal);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(config.title))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, Box::new(DemoTasks));
    tracing::info!("started");

    ui::run_app(&mut terminal, &mut app).inspect_err(|err| {
        tracing::error!(%err, "event loop failed");
    })?;
    Ok(())
}
