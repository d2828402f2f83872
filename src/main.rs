mod app;
mod config;
mod controls;
mod data;
mod host;
mod pages;
mod state;
mod ui;

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::AppConfig;
use data::ScoringData;
use state::SessionState;

#[derive(Parser, Debug)]
#[command(name = "scorekeep")]
#[command(version)]
#[command(about = "Judging and score entry pages for competition scoring")]
struct Args {
    /// Tournament data export (JSON)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Page to open first (e.g. choose-judging-group, scoreboard)
    #[arg(short, long)]
    page: Option<String>,

    /// Print the loaded tournament data as JSON and exit
    #[arg(long)]
    dump_data: bool,

    /// Forget stored selections and scores, then exit
    #[arg(long)]
    clear_session: bool,
}

// Single thread: page handlers share state through Rc
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (stderr keeps the alternate screen clean)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load().unwrap_or_default();

    if args.clear_session {
        return SessionState::clear_default();
    }

    let data = load_data(&args, &config).await?;

    if args.dump_data {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    let start_page = args.page.clone().unwrap_or_else(|| config.start_page.clone());
    run_tui(config, data, &start_page)
}

async fn load_data(args: &Args, config: &AppConfig) -> Result<ScoringData> {
    let path = args.data.as_ref().or(config.data_file.as_ref());
    match path {
        Some(path) => ScoringData::load(path)
            .await
            .with_context(|| format!("Could not load tournament data from {}", path.display())),
        None => {
            tracing::warn!("No data file given; pages will have nothing to show");
            Ok(ScoringData::default())
        }
    }
}

fn run_tui(config: AppConfig, data: ScoringData, start_page: &str) -> Result<()> {
    let (columns, _) = terminal::size()?;
    let mut app = App::new(config, data, start_page, columns)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.save_session() {
        tracing::warn!("Could not save session: {}", e);
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') if app.can_quit() => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    _ => {
                        // A failing handler must not take the whole UI down
                        if let Err(e) = app.handle_key(key) {
                            tracing::warn!("{:#}", e);
                            app.set_status(format!("Error: {:#}", e));
                        }
                    }
                },
                Event::Resize(columns, _) => app.resize(columns),
                _ => {}
            }
        }

        app.tick();
    }
}
