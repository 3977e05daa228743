use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

use pandemap::app::App;
use pandemap::map::WorldMap;
use pandemap::session::Session;
use pandemap::{data, ui};

/// Natural Earth admin-0 outlines keyed by alpha-3 code.
const WORLD_SHAPES_PATH: &str = "data/countries.json";

fn main() -> Result<()> {
    // Fetch and normalize before touching the terminal, so a failed
    // startup stays visible on stderr instead of vanishing into the TUI.
    let feeds = data::feeds::fetch_all()?;
    let session = Session::new(&feeds);

    let world = match data::load_world_shapes(Path::new(WORLD_SHAPES_PATH)) {
        Ok(shapes) => WorldMap::from_shapes(shapes),
        Err(e) => {
            eprintln!("Warning: failed to load {WORLD_SHAPES_PATH}: {e}");
            WorldMap::new()
        }
    };
    if !world.has_data() {
        eprintln!("Warning: no country outlines loaded; map pane will be empty");
    }

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    let result = run(&mut terminal, session, world);

    ratatui::restore();
    result
}

fn run(terminal: &mut DefaultTerminal, session: Session, world: WorldMap) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(session, world, size.width as usize, size.height as usize);

    loop {
        // Draw
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Poll briefly so playback ticks stay responsive between events.
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        handle_key(&mut app, key);
                    }
                }
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            // Toggle the time-series animation
            KeyCode::Char('t') => app.toggle_animation(),
            KeyCode::Char('c') => app.quit(),
            _ => {}
        }
        return;
    }

    match key.code {
        // Search input; Enter submits without clearing an unknown term
        KeyCode::Char(c) => app.push_char(c),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Tab => app.accept_suggestion(),
        KeyCode::Esc => {
            if app.search_input.is_empty() {
                app.quit();
            } else {
                app.clear_input();
            }
        }

        // Pan with arrow keys
        KeyCode::Left => app.pan(-10, 0),
        KeyCode::Right => app.pan(10, 0),
        KeyCode::Up => app.pan(0, -6),
        KeyCode::Down => app.pan(0, 6),

        // Zoom
        KeyCode::PageUp => app.zoom_in(),
        KeyCode::PageDown => app.zoom_out(),

        _ => {}
    }
}
