use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use taskman::application::task_service::TaskServiceImpl;
use taskman::infrastructure::memory_repo::InMemoryTaskRepository;
use taskman::ui::app::{App, Timings};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_logging()?;

    let timings = Timings {
        splash: duration_from_env("TASKMAN_SPLASH_MS", 2000),
        login: duration_from_env("TASKMAN_LOGIN_MS", 1500),
    };
    let service = TaskServiceImpl::new(InMemoryTaskRepository::new());
    let mut app = App::new(service, timings);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    tracing::info!("shutdown");
    res
}

// The TUI owns the terminal, so diagnostics go to a file instead of stderr.
fn init_logging() -> Result<()> {
    let path = std::env::var("TASKMAN_LOG").unwrap_or_else(|_| "taskman.log".to_string());
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    tracing::info!("starting");
    Ok(())
}

fn duration_from_env(key: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default_ms);
    Duration::from_millis(ms)
}
