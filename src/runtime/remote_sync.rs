use crate::app::App;
use crate::remote::RemoteHandle;

/// Publish the selected track and its status to remote callers.
pub fn publish(remote: &RemoteHandle, app: &App) {
    let track = app.selected();
    remote.set_track(Some(track.name()));
    remote.set_status(track.status());
}
