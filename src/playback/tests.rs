use super::state::{PlaybackState, volume_percent};
use super::*;
use crate::error::Error;
use crate::media::MediaEvent;
use crate::media::fake::{FakeBackend, PlayerCall, calls};
use std::path::PathBuf;
use std::time::Duration;

fn sources(n: usize) -> Vec<PathBuf> {
    (1..=n)
        .map(|i| PathBuf::from(format!("media/test{i}.mp3")))
        .collect()
}

fn registry(n: usize) -> (TrackRegistry, FakeBackend) {
    let mut backend = FakeBackend::default();
    let reg = TrackRegistry::load(&sources(n), &mut backend).unwrap();
    (reg, backend)
}

#[test]
fn load_opens_one_player_per_source_and_selects_first() {
    let (reg, backend) = registry(4);
    assert_eq!(reg.tracks().len(), 4);
    assert_eq!(backend.opened.len(), 4);
    assert_eq!(reg.selected_id(), 0);
    assert_eq!(reg.selected().name(), "test1.mp3");
    assert_eq!(reg.tracks()[2].source(), PathBuf::from("media/test3.mp3"));
    assert!(
        reg.tracks()
            .iter()
            .all(|t| t.status() == PlaybackStatus::Unknown)
    );
}

#[test]
fn load_refuses_empty_source_list() {
    let mut backend = FakeBackend::default();
    assert!(matches!(
        TrackRegistry::load(&[], &mut backend),
        Err(Error::EmptyLibrary)
    ));
}

#[test]
fn select_moves_the_binding_and_wraps_neighbours() {
    let (mut reg, _backend) = registry(3);

    assert!(!reg.select(0), "already selected");
    assert!(!reg.select(7), "out of range");
    assert_eq!(reg.prev_id(), 2);

    assert!(reg.select(2));
    assert_eq!(reg.selected_id(), 2);
    assert_eq!(reg.next_id(), 0);
    assert_eq!(reg.prev_id(), 1);
}

#[test]
fn dispose_all_releases_each_handle_once() {
    let (mut reg, backend) = registry(2);
    reg.dispose_all();
    reg.dispose_all();

    for id in 0..2 {
        assert_eq!(calls(&backend.handle(id)), vec![PlayerCall::Dispose]);
    }
}

#[test]
fn ready_records_duration_once() {
    let (mut reg, _backend) = registry(1);
    let track = reg.selected_mut();

    track.apply(&MediaEvent::Ready(Some(Duration::from_secs(90))));
    assert_eq!(track.status(), PlaybackStatus::Ready);
    assert_eq!(track.state().duration, Some(Duration::from_secs(90)));

    track.apply(&MediaEvent::Ready(Some(Duration::from_secs(5))));
    assert_eq!(track.state().duration, Some(Duration::from_secs(90)));
}

#[test]
fn end_of_media_sets_both_flags_without_commands() {
    let (mut reg, backend) = registry(1);
    let track = reg.selected_mut();
    track.apply(&MediaEvent::Ready(Some(Duration::from_secs(10))));
    track.apply(&MediaEvent::Playing);
    track.apply(&MediaEvent::EndOfMedia);

    assert!(track.state().at_end_of_media);
    assert!(track.state().stop_requested);
    assert_eq!(track.status(), PlaybackStatus::Stopped);
    assert!(calls(&backend.handle(0)).is_empty());
}

#[test]
fn deferred_pause_fires_exactly_once_on_next_playing() {
    let (mut reg, backend) = registry(1);
    let track = reg.selected_mut();
    track.apply(&MediaEvent::Ready(Some(Duration::from_secs(10))));
    track.apply(&MediaEvent::EndOfMedia);
    assert!(track.state().stop_requested);

    track.apply(&MediaEvent::Playing);
    assert_eq!(calls(&backend.handle(0)), vec![PlayerCall::Pause]);
    assert!(!track.state().stop_requested);
    assert_eq!(track.status(), PlaybackStatus::Paused);
    assert_eq!(track.state().pending, Some(PlaybackStatus::Paused));

    track.apply(&MediaEvent::Paused);
    assert_eq!(track.state().pending, None);
    track.apply(&MediaEvent::Playing);
    track.apply(&MediaEvent::Playing);
    assert_eq!(calls(&backend.handle(0)), vec![PlayerCall::Pause]);
    assert_eq!(track.status(), PlaybackStatus::Playing);
}

#[test]
fn confirmations_of_superseded_commands_are_ignored() {
    let (mut reg, _backend) = registry(1);
    let track = reg.selected_mut();
    track.apply(&MediaEvent::Ready(Some(Duration::from_secs(10))));

    track.record_command(PlaybackStatus::Playing);
    track.record_command(PlaybackStatus::Paused);

    // Answer to the play command: stale.
    track.apply(&MediaEvent::Playing);
    assert_eq!(track.status(), PlaybackStatus::Paused);
    assert_eq!(track.state().pending, Some(PlaybackStatus::Paused));

    track.apply(&MediaEvent::Paused);
    assert_eq!(track.status(), PlaybackStatus::Paused);
    assert_eq!(track.state().pending, None);
}

#[test]
fn unsolicited_confirmations_are_applied() {
    let (mut reg, _backend) = registry(1);
    let track = reg.selected_mut();
    track.apply(&MediaEvent::Ready(Some(Duration::from_secs(10))));

    track.apply(&MediaEvent::Playing);
    assert_eq!(track.status(), PlaybackStatus::Playing);
    track.apply(&MediaEvent::Paused);
    assert_eq!(track.status(), PlaybackStatus::Paused);
}

#[test]
fn end_of_media_and_halt_drop_the_pending_command() {
    let (mut reg, _backend) = registry(2);
    let track = reg.selected_mut();
    track.apply(&MediaEvent::Ready(Some(Duration::from_secs(10))));
    track.record_command(PlaybackStatus::Paused);
    track.apply(&MediaEvent::EndOfMedia);
    assert_eq!(track.state().pending, None);

    let other = reg.get_mut(1).unwrap();
    other.apply(&MediaEvent::Ready(None));
    other.record_command(PlaybackStatus::Playing);
    other.apply(&MediaEvent::Halted("device lost".into()));
    assert_eq!(other.state().pending, None);
}

#[test]
fn halted_is_terminal() {
    let (mut reg, _backend) = registry(1);
    let track = reg.selected_mut();
    track.apply(&MediaEvent::Halted("decode error".into()));
    assert_eq!(track.status(), PlaybackStatus::Halted);

    track.apply(&MediaEvent::Ready(Some(Duration::from_secs(3))));
    track.apply(&MediaEvent::Playing);
    track.apply(&MediaEvent::EndOfMedia);
    assert_eq!(track.status(), PlaybackStatus::Halted);
    assert_eq!(track.state().duration, None);
    assert!(!track.state().at_end_of_media);
}

#[test]
fn position_ratio_needs_known_positive_duration() {
    let mut state = PlaybackState::default();
    let at = Duration::from_secs(30);
    assert_eq!(state.position_ratio(at), None);

    state.status = PlaybackStatus::Ready;
    assert_eq!(state.position_ratio(at), None);

    state.duration = Some(Duration::ZERO);
    assert_eq!(state.position_ratio(at), None);

    state.duration = Some(Duration::from_secs(120));
    assert_eq!(state.position_ratio(at), Some(25.0));
    assert_eq!(state.position_ratio(Duration::from_secs(500)), Some(100.0));
}

#[test]
fn volume_percent_rounds_and_clamps() {
    assert_eq!(volume_percent(0.456), 46.0);
    assert_eq!(volume_percent(1.0), 100.0);
    assert_eq!(volume_percent(-0.2), 0.0);
}

#[test]
fn only_unknown_and_halted_ignore_toggles() {
    use PlaybackStatus::*;
    for s in [Ready, Playing, Paused, Stopped] {
        assert!(s.accepts_toggle(), "{s}");
    }
    for s in [Unknown, Halted] {
        assert!(!s.accepts_toggle(), "{s}");
    }
}
