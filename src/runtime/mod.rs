use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{error, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::dispatch;
use crate::error::Error;
use crate::library;
use crate::media::MediaEngine;
use crate::playback::TrackRegistry;
use crate::remote::RemoteCommandChannel;

mod event_loop;
mod logging;
mod remote_sync;
mod settings;

pub fn run() -> Result<(), Error> {
    let (settings, config_warning) = settings::load_settings();
    let _logger = logging::init(&settings.logging)?;
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }
    info!("encore starting");

    let sources = library::resolve_sources(&settings.library);

    let (poster, queue) = dispatch::channel();
    let mut engine = MediaEngine::spawn(poster.clone(), &settings.playback);

    let registry = match TrackRegistry::load(&sources, &mut engine) {
        Ok(r) => r,
        Err(e) => {
            error!("startup aborted: {e}");
            engine.shutdown();
            return Err(e);
        }
    };
    let mut app = App::new(registry, &settings.controls);

    let mut remote = RemoteCommandChannel::new(settings.remote.clone());
    let remote_handle = settings.remote.enabled.then(|| {
        remote.start(poster.clone());
        remote.handle()
    });
    if let Some(handle) = &remote_handle {
        remote_sync::publish(handle, &app);
    }

    let run_result = run_terminal(&settings, &mut app, &queue, remote_handle.as_ref());

    // Nothing may reach the UI thread once teardown starts.
    queue.close();
    remote.cancel();
    app.teardown();
    engine.shutdown();
    info!("encore stopped");

    run_result
}

fn run_terminal(
    settings: &crate::config::Settings,
    app: &mut App,
    queue: &dispatch::UiQueue,
    remote: Option<&crate::remote::RemoteHandle>,
) -> Result<(), Error> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = {
        let mut state = event_loop::EventLoopState::new(app);
        event_loop::run(&mut terminal, settings, app, queue, remote, &mut state)
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
