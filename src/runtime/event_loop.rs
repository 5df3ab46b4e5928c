use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Grab};
use crate::config;
use crate::dispatch::UiQueue;
use crate::error::Error;
use crate::media::TrackId;
use crate::playback::PlaybackStatus;
use crate::remote::RemoteHandle;
use crate::runtime::remote_sync::publish;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Selected track and its status as last published to remote callers.
    pub last_published: (TrackId, PlaybackStatus),
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            last_published: (app.selected_id(), app.status()),
        }
    }
}

/// Main terminal event loop: applies queued player events and remote
/// commands, draws, and handles keys. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    queue: &UiQueue,
    remote: Option<&RemoteHandle>,
    state: &mut EventLoopState,
) -> Result<(), Error> {
    loop {
        for msg in queue.drain() {
            app.handle(msg);
        }

        // Keep remote callers in sync whatever changed the status.
        let current = (app.selected_id(), app.status());
        if current != state.last_published {
            if let Some(remote) = remote {
                publish(remote, app);
            }
            state.last_published = current;
        }

        terminal.draw(|f| ui::draw(f, app, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the user asked to quit.
pub fn handle_key_event(key: KeyEvent, app: &mut App) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return key.code == KeyCode::Char('c');
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            app.toggle();
        }
        KeyCode::Char('s') => {
            app.grab(Grab::Position);
        }
        KeyCode::Char('v') => {
            app.grab(Grab::Volume);
        }
        KeyCode::Esc => app.release(),
        KeyCode::Char('h') | KeyCode::Left => app.adjust_grabbed(-1.0),
        KeyCode::Char('l') | KeyCode::Right => app.adjust_grabbed(1.0),
        KeyCode::Char('-') => app.nudge_volume(-1.0),
        KeyCode::Char('=') | KeyCode::Char('+') => app.nudge_volume(1.0),
        _ => {}
    }

    false
}
