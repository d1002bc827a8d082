use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Margin},
    Terminal,
};

use ringpager_core::AppConfig;
use ringpager_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    swipe::SwipeConfigExt,
    widgets::{PagerStripWidget, StatusBarWidget},
    App, DemoPage, StripViewport,
};

pub fn run(config: Arc<AppConfig>) -> Result<()> {
    let pages = DemoPage::deck(config.ui.page_count);
    tracing::info!(
        "Starting strip with {} pages ({}, {})",
        pages.len(),
        config.pager.strategy,
        config.pager.snapshot_mode
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("ringpager"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Border and status bar take three rows and two columns
    let size = terminal.size()?;
    let strip = StripViewport::extent_for_cells(
        size.width.saturating_sub(2),
        size.height.saturating_sub(3),
    );
    let mut app = App::new(config.clone(), pages, strip);

    let event_handler = EventHandler::new(
        config.ui.tick_rate_ms,
        config.ui.swipe.animation_tick_duration(),
    );

    let result = event_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        app.tick(Instant::now());
        for page in app.take_changes() {
            tracing::debug!("Now showing page {}", page);
        }

        terminal.draw(|frame| {
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            let inner = main_layout[0].inner(Margin::new(1, 1));
            app.resize(StripViewport::extent_for_cells(inner.width, inner.height));

            PagerStripWidget::render(frame, main_layout[0], app);
            StatusBarWidget::render(frame, main_layout[1], app);
        })?;

        // Frame rate while a swipe is running, tick rate otherwise
        let event = if app.needs_animation() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(AppEvent::Key(key)) = event {
            app.handle_action(handle_key_event(key), Instant::now());
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
