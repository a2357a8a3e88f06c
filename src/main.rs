use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;
use std::time::Instant;

mod app;
mod catalog;
mod chat;
mod config;
mod error;
mod prompts;
mod service;
mod stream;
mod suggest;

use app::App;
use error::ChatqError;
use service::AskClient;

/// Terminal chat client for the profile assistant
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Terminal chat client with contextual follow-up suggestions"
)]
struct Args {
    /// Source tag sent with every question (overrides config)
    #[arg(long)]
    source: Option<String>,

    /// Auth token sent with every question (overrides config)
    #[arg(long)]
    token: Option<String>,
}

fn main() -> Result<()> {
    // Writes to /tmp/chatq-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        use std::io::Write;

        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/chatq-debug.log")
            .expect("Failed to open /tmp/chatq-debug.log");

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .format(|buf, record| {
                use std::time::SystemTime;
                let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                writeln!(
                    buf,
                    "[{}] [{}] {}",
                    datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            })
            .init();

        log::debug!("=== CHATQ DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    let args = Args::parse();

    // Load config early and fold in CLI overrides
    let config_result = config::load_config();
    let mut config = config_result.config;
    if let Some(source) = args.source {
        config.service.source = source;
    }
    if let Some(token) = args.token {
        config.service.token = token;
    }

    validate_base_url(&config.service.base_url)?;

    if let Some(warning) = &config_result.warning {
        eprintln!("Warning: {}", warning);
    }

    let terminal = init_terminal()?;

    let mut app = App::new(&config);
    setup_ask_worker(&mut app, &config);

    let result = run(terminal, app);

    restore_terminal()?;
    result?;

    #[cfg(debug_assertions)]
    log::debug!("=== CHATQ DEBUG SESSION ENDED ===");

    Ok(())
}

/// Reject base URLs the HTTP client cannot use
fn validate_base_url(base_url: &str) -> Result<(), ChatqError> {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        Ok(())
    } else {
        Err(ChatqError::InvalidBaseUrl(base_url.to_string()))
    }
}

/// Initialize terminal with raw mode and alternate screen
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    if let Err(e) = execute!(stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

/// Set up the ask worker thread and channels
fn setup_ask_worker(app: &mut App, config: &config::Config) {
    let (request_tx, request_rx) = std::sync::mpsc::channel();
    let (response_tx, response_rx) = std::sync::mpsc::channel();
    app.set_channels(request_tx, response_rx);

    let client = AskClient::from_config(&config.service);
    service::spawn_worker(client, request_rx, response_tx);
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        // Drain worker responses and advance the reveal before drawing
        app.poll_answer_channel();
        app.drive_reveal(Instant::now());

        if app.should_render() {
            terminal.draw(|frame| app.render(frame))?;
            app.clear_dirty();
        }

        let timeout = app.poll_timeout(Instant::now());
        app.handle_events(timeout)?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
