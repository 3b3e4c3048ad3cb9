//! Terminal host for the flashfind controller.
//!
//! This binary supplies the concrete collaborators and the event loop around
//! the library: it parses the command line, loads configuration, initializes
//! tracing, runs the autostart routine once, then draws the launcher in the
//! alternate screen until the window is hidden.
//!
//! # Event Loop
//!
//! ```text
//! crossterm EventStream ─┐
//! controller channel  ───┼─ tokio::select! → Controller::handle → redraw
//! window hidden       ───┘                                  └→ exit
//! ```
//!
//! # Key and Pointer Mapping
//!
//! - Printable characters / `Backspace` / `Ctrl+u`: edit the query
//! - `Up` / `Down`: move the selection
//! - `Enter`: commit the selection (open file, copy calculator value)
//! - `Esc` / `Ctrl+c`: clear and hide
//! - Mouse move over a row: hover
//! - Left click on a row: commit that row
//! - Right click on a row: context menu
//! - Left click on a menu entry: that entry
//! - Any other left press: pointer-down plus global click (dismisses the menu)
//!
//! Hiding the window ends the session.

use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as TermEvent, EventStream, KeyCode, KeyEvent,
    KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use flashfind::app::{AppState, MenuGeometry, Viewport};
use flashfind::dispatcher::Controller;
use flashfind::infrastructure::{
    Collaborators, ScanSearchService, SystemClipboard, SystemLauncher, WindowHost,
};
use flashfind::startup::{ensure_autostart, DesktopEntryAutostart};
use flashfind::ui::{render, UIViewModel};
use flashfind::{Config, Event, FlashfindError};
use futures_util::future::BoxFuture;
use futures_util::StreamExt;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::watch;

/// Menu size in cells: one row per entry.
const TERMINAL_MENU: MenuGeometry = MenuGeometry { width: 20, height: 3 };

/// Keyboard-driven file launcher with an inline calculator.
#[derive(Debug, Parser)]
#[command(name = "flashfind", version, about)]
struct Cli {
    /// Configuration file (default: <config dir>/flashfind/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Tracing filter, e.g. `debug` or `flashfind=trace`
    #[arg(long, value_name = "LEVEL")]
    trace_level: Option<String>,

    /// Skip launch-at-login registration
    #[arg(long)]
    no_autostart: bool,

    /// Directory to search; repeatable, replaces configured roots
    #[arg(long = "root", value_name = "DIR")]
    roots: Vec<String>,

    /// Override a configuration key; repeatable
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,
}

impl Cli {
    /// Layers flags over the configuration file over the defaults.
    fn into_config(self) -> flashfind::Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        let overrides: BTreeMap<String, String> = self.overrides.into_iter().collect();
        config.apply_overrides(&overrides);

        if let Some(level) = self.trace_level {
            config.trace_level = Some(level);
        }
        if self.no_autostart {
            config.autostart = false;
        }
        if !self.roots.is_empty() {
            config.search_roots = self.roots;
        }
        Ok(config)
    }
}

fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got `{arg}`"))
}

/// Window collaborator: hiding the terminal window ends the session.
#[derive(Debug, Clone)]
struct TerminalWindow {
    hidden: Arc<watch::Sender<bool>>,
}

impl WindowHost for TerminalWindow {
    fn hide(&self) -> BoxFuture<'static, flashfind::Result<()>> {
        let hidden = Arc::clone(&self.hidden);
        Box::pin(async move {
            hidden
                .send(true)
                .map_err(|_| FlashfindError::Window("event loop is no longer running".into()))
        })
    }
}

/// Raw mode, alternate screen and mouse capture for the guard's lifetime.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Terminal size and the last drawn view model, used for hit testing.
struct Screen {
    rows: u16,
    cols: u16,
    viewmodel: Option<UIViewModel>,
}

impl Screen {
    fn draw(&mut self, state: &AppState) -> io::Result<()> {
        let now = chrono::Utc::now().timestamp();
        let (frame, viewmodel) = render(state, usize::from(self.rows), usize::from(self.cols), now);
        let mut stdout = io::stdout().lock();
        stdout.write_all(frame.as_bytes())?;
        stdout.flush()?;
        self.viewmodel = Some(viewmodel);
        Ok(())
    }

    fn result_at_row(&self, row: u16) -> Option<usize> {
        self.viewmodel.as_ref()?.result_at_row(usize::from(row))
    }

    /// Maps a terminal event to controller events.
    fn translate(&mut self, event: &TermEvent, state: &AppState) -> Vec<Event> {
        match event {
            TermEvent::Key(key) => translate_key(key, &state.query).into_iter().collect(),
            TermEvent::Mouse(mouse) => self.translate_mouse(mouse, state),
            TermEvent::Resize(cols, rows) => {
                self.cols = *cols;
                self.rows = *rows;
                vec![Event::Resized(Viewport {
                    width: u32::from(*cols),
                    height: u32::from(*rows),
                })]
            }
            _ => Vec::new(),
        }
    }

    fn translate_mouse(&self, mouse: &MouseEvent, state: &AppState) -> Vec<Event> {
        let (x, y) = (u32::from(mouse.column), u32::from(mouse.row));
        let menu = &state.context_menu;

        match mouse.kind {
            MouseEventKind::Moved if !menu.is_visible() => {
                self.result_at_row(mouse.row).map(Event::Hover).into_iter().collect()
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(item) = menu.item_at(x, y) {
                    return vec![Event::MenuSelected(item)];
                }
                if !menu.is_visible() {
                    if let Some(index) = self.result_at_row(mouse.row) {
                        return vec![Event::Click(index)];
                    }
                }
                vec![Event::PointerDown { x, y }, Event::GlobalClick]
            }
            MouseEventKind::Down(MouseButton::Right) => self
                .result_at_row(mouse.row)
                .map(|index| Event::ContextMenuRequested { x, y, index })
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn translate_key(key: &KeyEvent, query: &str) -> Option<Event> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(Event::Escape),
        KeyCode::Char('u') if ctrl => Some(Event::QueryChanged(String::new())),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            let mut next = query.to_string();
            next.push(c);
            Some(Event::QueryChanged(next))
        }
        KeyCode::Backspace if !query.is_empty() => {
            let mut next = query.to_string();
            next.pop();
            Some(Event::QueryChanged(next))
        }
        KeyCode::Up => Some(Event::ArrowUp),
        KeyCode::Down => Some(Event::ArrowDown),
        KeyCode::Enter => Some(Event::Enter),
        KeyCode::Esc => Some(Event::Escape),
        _ => None,
    }
}

/// What woke the event loop.
enum Wake {
    Terminal(Option<io::Result<TermEvent>>),
    Controller(Option<Event>),
    Hidden,
}

async fn run(config: Config) -> flashfind::Result<()> {
    let (hidden_tx, mut hidden_rx) = watch::channel(false);
    let collaborators = Collaborators {
        search: Arc::new(ScanSearchService::new(&config.search_roots, config.scan_depth, config.max_results)),
        launcher: Arc::new(SystemLauncher),
        clipboard: Arc::new(SystemClipboard::spawn()?),
        window: Arc::new(TerminalWindow {
            hidden: Arc::new(hidden_tx),
        }),
    };

    let (cols, rows) = terminal::size()?;
    let viewport = Viewport {
        width: u32::from(cols),
        height: u32::from(rows),
    };
    let state = AppState::new(config.menu_geometry_or(TERMINAL_MENU), viewport);
    let mut controller = Controller::new(state, collaborators, config.dispatch_settings());

    let _guard = TerminalGuard::enter()?;
    let mut screen = Screen {
        rows,
        cols,
        viewmodel: None,
    };
    screen.draw(controller.state())?;

    let mut terminal_events = EventStream::new();
    loop {
        let wake = tokio::select! {
            input = terminal_events.next() => Wake::Terminal(input),
            event = controller.next_event() => Wake::Controller(event),
            _ = hidden_rx.changed() => Wake::Hidden,
        };

        let render = match wake {
            Wake::Terminal(Some(Ok(input))) => {
                let mut render = false;
                for event in screen.translate(&input, controller.state()) {
                    render |= controller.handle(event);
                }
                render
            }
            Wake::Terminal(Some(Err(e))) => {
                tracing::error!(error = %e, "terminal input failed");
                break;
            }
            Wake::Terminal(None) | Wake::Controller(None) | Wake::Hidden => break,
            Wake::Controller(Some(event)) => controller.handle(event),
        };

        if render {
            screen.draw(controller.state())?;
        }
    }

    tracing::info!("window hidden, leaving");
    controller.shutdown();
    Ok(())
}

fn register_autostart() {
    let exec = match std::env::current_exe() {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "cannot resolve executable path for autostart");
            return;
        }
    };
    match DesktopEntryAutostart::for_current_user(exec) {
        Ok(entry) => {
            let outcome = ensure_autostart(&entry);
            tracing::debug!(?outcome, path = %entry.path().display(), "autostart checked");
        }
        Err(e) => tracing::warn!(error = %e, "autostart unavailable"),
    }
}

fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("flashfind: {e}");
            return ExitCode::FAILURE;
        }
    };

    flashfind::observability::init_tracing(&config);
    tracing::info!(roots = ?config.search_roots, "flashfind starting");

    if config.autostart {
        register_autostart();
    }

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(FlashfindError::from)
        .and_then(|runtime| runtime.block_on(run(config)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "flashfind exited with an error");
            eprintln!("flashfind: {e}");
            ExitCode::FAILURE
        }
    }
}
