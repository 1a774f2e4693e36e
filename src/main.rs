mod app;
mod config;
mod menu;
mod theme;
mod ui;
mod workout;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::AppConfig;
use ui::HitMap;

#[derive(Parser, Debug)]
#[command(name = "liftbook")]
#[command(author = "Sean Fournier")]
#[command(version = "0.1.0")]
#[command(about = "Compose a workout routine in the terminal")]
struct Args {
    /// Initial workout name
    #[arg(short, long)]
    name: Option<String>,

    /// Print the last saved routine as JSON after exiting
    #[arg(short, long)]
    print: bool,

    /// Write logs here instead of the data directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // The TUI owns stdout, so logs go to a file
    init_logging(args.log_file.clone())?;

    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(name) = args.name {
        config.workout_name = name;
    }
    if args.print {
        config.print_on_exit = true;
    }

    ui::init_theme(theme::Theme::from_config(&config.theme));

    let app = run_tui(config).await?;

    if app.config.print_on_exit {
        if let Some(routine) = &app.last_saved {
            println!("{}", serde_json::to_string_pretty(routine)?);
        }
    }
    Ok(())
}

fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => {
            let dir = dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?
                .join("liftbook");
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Could not create {}", dir.display()))?;
            dir.join("liftbook.log")
        }
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open log file {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(filter)
        .init();
    Ok(())
}

async fn run_tui(config: AppConfig) -> Result<App> {
    // Setup terminal; mouse capture stays on until teardown
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    tracing::info!("Exiting");
    result.map(|_| app)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let mut hits = HitMap::default();
        terminal.draw(|f| hits = ui::draw(f, app))?;
        app.hits = hits;

        if event::poll(std::time::Duration::from_millis(100))? {
            // Handle input and catch any errors to prevent crashes
            let handled = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let ctrl = key.modifiers.contains(event::KeyModifiers::CONTROL);
                    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
                        return Ok(());
                    }
                    app.handle_key(key)
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => Ok(()),
            };

            if let Err(e) = handled {
                tracing::warn!("Input handling failed: {}", e);
                app.set_status(format!("Error: {}", e));
            }
        }

        app.tick();
    }
}
