mod app;
mod preview;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, warn};
use marginalia_config::{Config, DecorationSettings, MissingIndexPolicy, UnclosedBracePolicy};
use marginalia_engine::{Document, EditorMode, MissingIndex, ScanOptions, UnclosedBrace};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env,
    fs::File,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

use crate::app::App;
use crate::preview::SegmentKind;

type Backend = CrosstermBackend<Stdout>;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let path = match parse_args(&args[1..]) {
        Some(Command::Open(path)) => path,
        Some(Command::InitConfig) => {
            let config_path = Config::config_path();
            if config_path.exists() {
                eprintln!("Config already exists at {}", config_path.display());
                process::exit(1);
            }
            Config::default().save()?;
            println!("Wrote default config to {}", config_path.display());
            return Ok(());
        }
        None => {
            eprintln!("Usage: {} [FILE]", args[0]);
            eprintln!("       {} --init-config", args[0]);
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    init_logging();

    let document = match &path {
        Some(path) if path.exists() => {
            let bytes =
                std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            Document::from_bytes(&bytes)
                .with_context(|| format!("{} is not valid UTF-8", path.display()))?
        }
        _ => Document::from_text(""),
    };
    debug!("loaded {} bytes", document.len());

    let settings = &config.decorations;
    let mode = if settings.start_in_source_mode {
        EditorMode::Source
    } else {
        EditorMode::LivePreview
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let height = text_area(Rect::new(0, 0, size.width, size.height)).height;
    let mut app = App::new(
        path,
        document,
        scan_options(settings),
        mode,
        height as usize,
    );

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }
    if app.is_dirty() {
        eprintln!("Quit without saving changes");
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// Edit a file, or a scratch buffer when no path is given.
    Open(Option<PathBuf>),
    /// Write the default config file and exit.
    InitConfig,
}

fn parse_args(args: &[String]) -> Option<Command> {
    match args {
        [] => Some(Command::Open(None)),
        [flag] if flag == "--init-config" => Some(Command::InitConfig),
        [flag] if flag.starts_with("--") => None,
        [path] => Some(Command::Open(Some(PathBuf::from(path)))),
        _ => None,
    }
}

/// Logs go to a file next to other temp files; stderr belongs to the
/// terminal UI while it runs.
fn init_logging() {
    let log_path = env::temp_dir().join("marginalia.log");
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match File::create(&log_path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("Warning: cannot write {}: {e}", log_path.display());
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn scan_options(settings: &DecorationSettings) -> ScanOptions {
    ScanOptions {
        anchor_tag: settings.anchor_tag.clone(),
        unclosed_brace: match settings.unclosed_brace {
            UnclosedBracePolicy::Skip => UnclosedBrace::Skip,
            UnclosedBracePolicy::ToEndOfDocument => UnclosedBrace::ToEndOfDocument,
        },
        missing_index: match settings.missing_index {
            MissingIndexPolicy::Render => MissingIndex::Render,
            MissingIndexPolicy::Skip => MissingIndex::Skip,
        },
    }
}

fn run_app(terminal: &mut Terminal<Backend>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if !handle_key(app, key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let size = terminal.size()?;
                let area = text_area(Rect::new(0, 0, size.width, size.height));
                if area.contains(Position::new(mouse.column, mouse.row)) {
                    app.click(
                        usize::from(mouse.row - area.y),
                        usize::from(mouse.column - area.x),
                    );
                }
            }
            Event::Resize(width, height) => {
                let area = text_area(Rect::new(0, 0, width, height));
                app.resize(area.height as usize);
            }
            _ => {}
        }
    }
}

/// Returns false when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Esc => return false,
        KeyCode::Char('q') if ctrl => return false,
        KeyCode::Char('s') if ctrl => {
            if let Err(e) = app.save() {
                warn!("save failed: {e:#}");
                app.set_status(format!("{e:#}"));
            }
        }
        KeyCode::Char(c) if !ctrl => app.insert(&c.to_string()),
        KeyCode::Left => app.move_left(shift),
        KeyCode::Right => app.move_right(shift),
        KeyCode::Up => app.move_up(shift),
        KeyCode::Down => app.move_down(shift),
        KeyCode::Home => app.move_home(shift),
        KeyCode::End => app.move_end(shift),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Tab => app.toggle_mode(),
        KeyCode::Enter => app.enter(),
        _ => {}
    }
    true
}

fn layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(area);
    (chunks[0], chunks[1])
}

/// Where document text is drawn, inside the editor border.
fn text_area(area: Rect) -> Rect {
    let (editor, _) = layout(area);
    Block::default().borders(Borders::ALL).inner(editor)
}

fn ui(f: &mut Frame, app: &mut App) {
    let (editor, status_area) = layout(f.area());

    let text: Vec<Line> = app
        .visible_lines()
        .into_iter()
        .map(|segments| {
            Line::from(
                segments
                    .into_iter()
                    .map(|segment| {
                        let style = match segment.kind {
                            SegmentKind::Text => Style::default(),
                            SegmentKind::Selected => Style::default().bg(Color::Yellow).fg(Color::Black),
                            SegmentKind::Widget { active: true } => Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                            SegmentKind::Widget { active: false } => {
                                Style::default().fg(Color::DarkGray)
                            }
                        };
                        Span::styled(segment.text, style)
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let content =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(app.title()));
    f.render_widget(content, editor);

    let inner = text_area(f.area());
    if let Some((column, row)) = app.caret_cell() {
        let x = inner.x.saturating_add(column as u16);
        if x < inner.right() {
            f.set_cursor_position(Position::new(x, inner.y + row as u16));
        }
    }

    // Status message, or the key help when there is none
    let status = if app.status().is_empty() {
        Line::from(vec![
            Span::raw("Esc/Ctrl-Q: Quit | "),
            Span::raw("Ctrl-S: Save | "),
            Span::raw("Tab: Live/Source | "),
            Span::raw("Enter/Click: Open annotation"),
        ])
    } else {
        Line::from(Span::styled(
            app.status().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
    };
    f.render_widget(Paragraph::new(status), status_area);
}
