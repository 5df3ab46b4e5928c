mod app;
mod config;
mod dispatch;
mod error;
mod library;
mod media;
mod playback;
mod remote;
mod runtime;
mod sync;
mod transport;
mod ui;

fn main() -> Result<(), error::Error> {
    runtime::run()
}
