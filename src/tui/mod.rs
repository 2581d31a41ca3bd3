// Module declarations
pub mod action;
pub mod app;
pub mod content;
pub mod keys;
pub mod nav_menu;
pub mod smooth_scroll;
pub mod view;
pub mod viewport;

#[cfg(test)]
pub mod testing;


pub use action::Action;
pub use app::App;
pub use content::ContentPane;
pub use keys::{key_to_action, mouse_to_action};
pub use nav_menu::NavMenu;
pub use viewport::Viewport;

use std::io;
use std::time::{Duration, Instant};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use crate::config::Config;
use crate::document::Document;

/// Poll interval while the menu is animating (~60 fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Poll interval when idle
const IDLE_INTERVAL: Duration = Duration::from_millis(100);

/// Main entry point for the viewer
pub fn run(document: Document, config: Config) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, App::new(document, config));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<(), io::Error> {
    // Initial layout also runs the first highlight
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| {
            let area = f.area();
            view::render(&app, area, f.buffer_mut());
        })?;

        let timeout = poll_timeout(app.is_animating(), last_tick.elapsed());
        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => key_to_action(key),
                Event::Mouse(mouse) => mouse_to_action(mouse, app.config().scroll_lines),
                Event::Resize(width, height) => Some(Action::Resize(width, height)),
                _ => None,
            };

            if let Some(action) = action {
                tracing::debug!("ACTION: {:?}", action);
                app.dispatch(action);
            }
        }

        // Ticks follow frame time, not poll timeouts
        if tick_due(app.is_animating(), last_tick.elapsed()) {
            app.dispatch(Action::Tick);
            last_tick = Instant::now();
        } else if !app.is_animating() {
            last_tick = Instant::now();
        }

        if app.should_quit() {
            tracing::debug!("ACTION: Quitting viewer");
            break;
        }
    }

    Ok(())
}

/// How long to wait for input before the next frame
fn poll_timeout(animating: bool, since_tick: Duration) -> Duration {
    if animating {
        FRAME_INTERVAL.saturating_sub(since_tick)
    } else {
        IDLE_INTERVAL
    }
}

fn tick_due(animating: bool, since_tick: Duration) -> bool {
    animating && since_tick >= FRAME_INTERVAL
}
