use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::{info, warn};

use lumen_core::{AppConfig, PageSpec};
use lumen_tui::{
    app::{App, Mode},
    event::EventHandler,
    load_theme,
    widgets::{CursorLightWidget, NavWidget, PageWidget, PopupWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, page: PageSpec) -> Result<()> {
    // Warnings only; hard errors stop here before the terminal is touched
    for warning in page.validate()? {
        warn!("{}", warning);
    }
    let title = format!("{} - Lumen", page.title);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle(title)
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = load_theme(&config.ui.theme);
    let size = terminal.size()?;
    let mut app = App::new(config.clone(), page, theme, size.width, size.height);
    app.start();

    let mut events = EventHandler::start(config.ui.tick_rate_ms, config.scroll.animation_fps);
    info!("Terminal host running at {}x{}", size.width, size.height);

    let result = main_loop(&mut terminal, &mut app, &mut events).await;
    events.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

async fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        match events.next().await {
            Some(event) => app.handle_event(event),
            None => break,
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let layout = app.layout;

    PageWidget::render(frame, layout.page, app);
    CursorLightWidget::render(frame, layout.page, app);

    if let Some(bar) = layout.toggle {
        NavWidget::render_toggle(frame, bar, app);
    }
    if let Some(nav) = layout.nav {
        NavWidget::render(frame, nav, app);
    }
    StatusBarWidget::render(frame, layout.status, app);

    if let Mode::Alert(message) = &app.mode {
        PopupWidget::render_alert(frame, message, &app.theme);
    }
}
