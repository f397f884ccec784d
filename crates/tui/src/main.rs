mod app;
mod renderer;

use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};
use resonador_core::host::SystemClock;
use resonador_core::svg::render_svg;
use resonador_core::timing::UiLimiter;
use resonador_core::{MonitorConfig, Realm};
use resonador_protocol::Viewport;

use crate::app::App;
use crate::renderer::{CELL_H, CELL_W, draw_commands};

/// How long the loop waits for input before stepping a frame.
const FRAME_POLL: Duration = Duration::from_millis(8);

#[derive(Parser, Debug)]
#[command(
    name = "resonador",
    version,
    about = "Talk to the realm guardians, with a live frame-rate overlay"
)]
struct Args {
    /// Realm to start in
    #[arg(long, default_value = "cosmos")]
    realm: Realm,

    /// Monitor settings as TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Start without the FPS overlay
    #[arg(long)]
    no_overlay: bool,

    /// Write the opening screen as SVG to this file and exit
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,
}

/// Logical size of a `--snapshot` render.
const SNAPSHOT_SIZE: (f64, f64) = (960.0, 540.0);

fn init_tracing(path: &Path) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("resonador=info,info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<MonitorConfig> {
    let Some(path) = path else {
        return Ok(MonitorConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    MonitorConfig::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        init_tracing(path)?;
    }
    let config = load_config(args.config.as_deref())?;
    tracing::info!(realm = %args.realm, ?config, "starting");

    let app = App::new(
        SystemClock::new(),
        config,
        args.realm,
        rand::rng(),
        !args.no_overlay,
    );
    match &args.snapshot {
        Some(path) => write_snapshot(&app, path),
        None => run(app),
    }
}

fn write_snapshot(app: &App, path: &Path) -> Result<()> {
    let (width, height) = SNAPSHOT_SIZE;
    let commands = app.commands(&Viewport::new(width, height));
    let svg = render_svg(&commands, width, height, true);
    std::fs::write(path, svg).with_context(|| format!("writing snapshot {}", path.display()))?;
    tracing::info!(path = %path.display(), commands = commands.len(), "snapshot written");
    Ok(())
}

fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);
    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut limiter = UiLimiter::new(SystemClock::new());

    while !app.should_quit() {
        app.tick();

        let mut drawn = Ok(());
        limiter.run(|| drawn = terminal.draw(|frame| draw(frame, app)).map(|_| ()));
        drawn?;

        if event::poll(FRAME_POLL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }
    }
    Ok(())
}

fn draw(frame: &mut ratatui::Frame<'_>, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(Color::Black)), area);

    let content = Rect::new(0, 0, area.width, area.height.saturating_sub(1));
    let viewport = Viewport::new(
        f64::from(content.width) * CELL_W,
        f64::from(content.height) * CELL_H,
    );
    let commands = app.commands(&viewport);
    draw_commands(frame.buffer_mut(), content, &commands);

    let monitor = app.monitor();
    let status = format!(
        " {} | {} fps {:.2}ms {} | ←→ realm  enter next  h hint  o overlay  p pause  q quit ",
        app.session().realm(),
        monitor.fps(),
        monitor.frame_time(),
        monitor.status().as_str(),
    );
    let footer = Rect::new(0, content.height, area.width, 1.min(area.height));
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        footer,
    );
}
