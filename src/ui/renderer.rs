//! Terminal setup and the main event loop

use crate::backend::factory::create_backend;
use crate::config::Config;
use crate::logger::Logger;
use crate::ui::app_component::AppComponent;
use crate::ui::core::{AppContext, Component, EventHandler, EventType};
use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;

/// Run the TUI until the user quits
pub async fn run_app(config: Config, logger: Logger) -> Result<()> {
    let backend = create_backend(&config.api)?;
    let context = AppContext::new(backend, config, logger);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter the alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = AppComponent::new(context);
    app.start();
    let mut event_handler = EventHandler::new();

    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
) -> Result<()> {
    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| app.render(f, f.area()))?;
            needs_render = false;
        }

        match event_handler.next_event().await? {
            EventType::Key(key) => {
                app.handle_key(key);
                needs_render = true;
            }
            EventType::Resize(_, _) => needs_render = true,
            EventType::Tick => {
                // Background results and expiring notifications both change the screen
                app.on_tick();
                needs_render = true;
            }
            EventType::Other => {}
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
