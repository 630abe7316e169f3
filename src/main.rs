use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::{info, warn};

use backoffice::app::{App, InputMode};
use backoffice::config::{self, Config, Settings};
use backoffice::core::NotifyLevel;
use backoffice::domain::backoffice::{SpamTab, Tab, View};
use backoffice::infrastructure::backoffice::HttpBackofficeApi;
use backoffice::infrastructure::runtime::{RuntimeBridge, RuntimeCommand};
use backoffice::logging;
use backoffice::modules::export::ExportFormat;
use backoffice::ui;

#[derive(Debug, Parser)]
#[command(
    name = "backoffice",
    version,
    about = "Backoffice: a terminal dashboard for leads and spam activity"
)]
struct Args {
    /// Backend base URL (e.g. http://localhost:3000 or https://host/prod)
    #[arg(long)]
    api: Option<String>,

    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = match args.config.as_deref() {
        Some(path) => Some(config::load_required(path)),
        None => config::config_path().as_deref().map(config::load_from),
    };
    let config_path = args.config.clone().or_else(config::config_path);
    let (config, config_error) = match loaded {
        Some(Ok(config)) => (config, None),
        Some(Err(err)) => (Config::default(), Some(err)),
        None => (Config::default(), None),
    };

    let log_path = logging::init(config::log_dir());
    let env_api = std::env::var(config::API_URL_ENV).ok();
    let api_base_url =
        config::resolve_api_base_url(args.api.as_deref(), env_api.as_deref(), &config);

    let mut settings = Settings::from_config(&config, api_base_url);
    settings.config_path = config_path;
    settings.log_path = log_path.as_ref().ok().cloned();
    info!(api = %settings.api_base_url, "starting");

    let api = HttpBackofficeApi::new(&settings.api_base_url, settings.request_timeout)
        .with_context(|| format!("invalid API base URL {}", settings.api_base_url))?;
    let runtime = RuntimeBridge::new(Arc::new(api))?;

    let mut app = App::new(settings);
    if let Some(err) = config_error {
        warn!(error = %err, "config ignored");
        app.notify(NotifyLevel::Error, format!("{err}; using defaults"));
    }
    if let Err(err) = &log_path {
        app.notify(NotifyLevel::Error, format!("Logging disabled: {err}"));
    }
    app.start();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            info!("quit");
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse, terminal.size()?),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        pump_background(&mut app, &runtime);
    }
}

/// Apply finished fetches, then hand newly queued requests to the worker
fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        app.apply_runtime_event(event);
    }

    for (ticket, request) in app.take_requests() {
        if let Err(err) = runtime.send(RuntimeCommand::Fetch { ticket, request }) {
            app.notify(NotifyLevel::Error, err.to_string());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    if app.show_settings {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q')) {
            app.show_settings = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Search => handle_search_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        (KeyCode::Char('q'), _) => app.should_quit = true,
        (KeyCode::Char('?'), _) => app.show_help = true,
        (KeyCode::Char('s'), _) => app.show_settings = true,
        (KeyCode::Char(':'), _) => app.enter_command(),
        (KeyCode::Char('/'), _) => app.enter_search(),
        (KeyCode::Char('r'), _) => app.refresh(),
        (KeyCode::Char('e'), _) => app.export_current(ExportFormat::Csv),
        (KeyCode::Char(c @ '1'..='3'), _) => {
            if let Some(tab) = Tab::from_shortcut(c) {
                app.select_tab(tab);
            }
        }
        (KeyCode::Tab, _) => app.cycle_tab(true),
        (KeyCode::BackTab, _) => app.cycle_tab(false),
        (KeyCode::Char('a'), _) => app.select_spam_tab(SpamTab::Activities),
        (KeyCode::Char('u'), _) => app.select_spam_tab(SpamTab::Users),
        (KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l'), _) => {
            app.toggle_spam_tab()
        }
        (KeyCode::Enter, _) if app.current_view() == View::Search => app.enter_search(),
        (KeyCode::Char('j') | KeyCode::Down, _) => app.scroll_down(),
        (KeyCode::Char('k') | KeyCode::Up, _) => app.scroll_up(),
        (KeyCode::Esc, _) => app.dismiss(),
        _ => {}
    }
}

fn handle_search_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_search(),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.search_input.push(ch);
        }
        _ => {}
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command_input.push(ch);
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, size: Rect) {
    if app.show_help || app.show_settings || app.input_mode != InputMode::Normal {
        return;
    }
    let areas = ui::layout::areas(size);
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(tab) = ui::tabs::tab_at(areas.header, col, row) {
                app.select_tab(tab);
            } else if let View::Spam(_) = app.current_view() {
                let (strip, _) = ui::layout::spam_areas(areas.main);
                if let Some(sub) = ui::tabs::spam_tab_at(strip, col, row) {
                    app.select_spam_tab(sub);
                }
            }
        }
        MouseEventKind::ScrollUp => app.scroll_up(),
        MouseEventKind::ScrollDown => app.scroll_down(),
        _ => {}
    }
}
