use super::*;
use crate::config::Settings;
use crate::library::Track;
use crate::player::fake::{Cmd, FakeBackend};
use crate::player::LoopMode;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn setup(names: &[&str]) -> (App, Controller<FakeBackend>, Settings) {
    let settings = Settings::default();
    let mut controller = Controller::new(FakeBackend::default(), settings.library.clone());
    controller.extend(
        names
            .iter()
            .map(|n| Track::untagged(format!("/music/{n}.mp3")))
            .collect(),
    );
    (App::new(true), controller, settings)
}

#[test]
fn gg_needs_two_presses_and_other_keys_reset_it() {
    let mut state = EventLoopState::default();
    assert_eq!(command_for_key(key(KeyCode::Char('g')), &mut state), None);
    assert_eq!(
        command_for_key(key(KeyCode::Char('g')), &mut state),
        Some(ControlCmd::CursorTop)
    );

    command_for_key(key(KeyCode::Char('g')), &mut state);
    command_for_key(key(KeyCode::Char('j')), &mut state);
    assert!(!state.pending_gg);
    assert_eq!(command_for_key(key(KeyCode::Char('g')), &mut state), None);
}

#[test]
fn transport_keys_map_to_commands() {
    let mut state = EventLoopState::default();
    let cases = [
        (KeyCode::Char(' '), ControlCmd::PlayPause),
        (KeyCode::Char('s'), ControlCmd::Stop),
        (KeyCode::Char('l'), ControlCmd::Next),
        (KeyCode::Left, ControlCmd::Prev),
        (KeyCode::Char('L'), ControlCmd::SeekForward),
        (KeyCode::Char('+'), ControlCmd::VolumeUp),
        (KeyCode::Char('r'), ControlCmd::CycleLoop),
        (KeyCode::Delete, ControlCmd::RemoveSelected),
        (KeyCode::Char('q'), ControlCmd::Quit),
    ];
    for (code, expected) in cases {
        assert_eq!(command_for_key(key(code), &mut state), Some(expected));
    }
    assert_eq!(command_for_key(key(KeyCode::Char('Z')), &mut state), None);
}

#[test]
fn ctrl_c_quits() {
    let mut state = EventLoopState::default();
    let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(command_for_key(ev, &mut state), Some(ControlCmd::Quit));
}

#[test]
fn quit_command_requests_shutdown() {
    let (mut app, mut c, settings) = setup(&["a"]);
    assert!(handle_control_cmd(ControlCmd::Quit, &settings, &mut app, &mut c));
    assert!(!handle_control_cmd(ControlCmd::Stop, &settings, &mut app, &mut c));
}

#[test]
fn play_selected_starts_cursor_track_once() {
    let (mut app, mut c, settings) = setup(&["a", "b", "c"]);
    app.selected = 2;
    handle_control_cmd(ControlCmd::PlaySelected, &settings, &mut app, &mut c);
    assert_eq!(c.current(), Some(2));
    assert_eq!(c.state(), PlaybackState::Playing);

    let loads = c.backend().log.len();
    handle_control_cmd(ControlCmd::PlaySelected, &settings, &mut app, &mut c);
    assert_eq!(c.backend().log.len(), loads, "replaying the playing track is a no-op");
}

#[test]
fn play_selected_on_empty_playlist_only_warns() {
    let (mut app, mut c, settings) = setup(&[]);
    handle_control_cmd(ControlCmd::PlaySelected, &settings, &mut app, &mut c);
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert!(c.backend().log.is_empty());
    assert_eq!(c.notice().unwrap().text, "Playlist is empty");
}

#[test]
fn volume_keys_use_configured_step() {
    let (mut app, mut c, mut settings) = setup(&["a"]);
    settings.audio.volume_step = 10;
    handle_control_cmd(ControlCmd::VolumeDown, &settings, &mut app, &mut c);
    handle_control_cmd(ControlCmd::VolumeDown, &settings, &mut app, &mut c);
    assert_eq!(c.volume(), 80);
    handle_control_cmd(ControlCmd::VolumeUp, &settings, &mut app, &mut c);
    assert_eq!(c.backend().log.last(), Some(&Cmd::Volume(90)));
}

#[test]
fn seek_keys_use_configured_seconds() {
    let (mut app, mut c, settings) = setup(&["a"]);
    c.play(None);
    handle_control_cmd(ControlCmd::SeekForward, &settings, &mut app, &mut c);
    assert_eq!(
        c.backend().log.last(),
        Some(&Cmd::Seek(Duration::from_secs(settings.controls.seek_seconds)))
    );
}

#[test]
fn move_down_carries_cursor_with_track() {
    let (mut app, mut c, settings) = setup(&["a", "b", "c"]);
    handle_control_cmd(ControlCmd::MoveDown, &settings, &mut app, &mut c);
    assert_eq!(app.selected, 1);
    assert!(!app.follow_playback);
    assert_eq!(c.playlist().get(1).unwrap().title, "a");

    app.selected = 2;
    handle_control_cmd(ControlCmd::MoveDown, &settings, &mut app, &mut c);
    assert_eq!(app.selected, 2, "last track cannot move further down");
}

#[test]
fn move_up_at_top_is_noop() {
    let (mut app, mut c, settings) = setup(&["a", "b"]);
    handle_control_cmd(ControlCmd::MoveUp, &settings, &mut app, &mut c);
    assert_eq!(app.selected, 0);
    assert_eq!(c.playlist().get(0).unwrap().title, "a");
}

#[test]
fn remove_selected_keeps_cursor_in_range() {
    let (mut app, mut c, settings) = setup(&["a", "b"]);
    app.selected = 1;
    handle_control_cmd(ControlCmd::RemoveSelected, &settings, &mut app, &mut c);
    assert_eq!(c.playlist().len(), 1);
    assert_eq!(app.selected, 0);

    handle_control_cmd(ControlCmd::RemoveSelected, &settings, &mut app, &mut c);
    handle_control_cmd(ControlCmd::RemoveSelected, &settings, &mut app, &mut c);
    assert!(c.playlist().is_empty());
}

#[test]
fn cursor_commands_turn_follow_off() {
    let (mut app, mut c, settings) = setup(&["a", "b", "c"]);
    handle_control_cmd(ControlCmd::CursorBottom, &settings, &mut app, &mut c);
    assert_eq!(app.selected, 2);
    assert!(!app.follow_playback);

    handle_control_cmd(ControlCmd::CursorDown, &settings, &mut app, &mut c);
    assert_eq!(app.selected, 0);
}

#[test]
fn toggle_follow_jumps_to_current_track() {
    let (mut app, mut c, settings) = setup(&["a", "b", "c"]);
    c.play(Some(2));
    app.follow_playback_off();

    handle_control_cmd(ControlCmd::ToggleFollow, &settings, &mut app, &mut c);
    assert!(app.follow_playback);
    assert_eq!(app.selected, 2);
}

#[test]
fn cycle_loop_goes_through_controller() {
    let (mut app, mut c, settings) = setup(&["a"]);
    handle_control_cmd(ControlCmd::CycleLoop, &settings, &mut app, &mut c);
    assert_eq!(c.loop_mode(), LoopMode::All);
}

#[test]
fn prompt_keys_edit_and_submit() {
    let mut app = App::new(false);
    app.open_prompt();
    for c in "/tmp/x".chars() {
        assert_eq!(handle_prompt_key(key(KeyCode::Char(c)), &mut app), None);
    }
    handle_prompt_key(key(KeyCode::Backspace), &mut app);
    assert_eq!(
        handle_prompt_key(key(KeyCode::Enter), &mut app).as_deref(),
        Some("/tmp/")
    );
    assert!(!app.prompt_open());
}

#[test]
fn prompt_escape_cancels() {
    let mut app = App::new(false);
    app.open_prompt();
    handle_prompt_key(key(KeyCode::Char('a')), &mut app);
    assert_eq!(handle_prompt_key(key(KeyCode::Esc), &mut app), None);
    assert!(!app.prompt_open());
}

#[test]
fn dismiss_closes_popup_and_clears_notice() {
    let (mut app, mut c, settings) = setup(&[]);
    c.play(None);
    app.toggle_metadata_window();
    assert!(c.notice().is_some());

    handle_control_cmd(ControlCmd::Dismiss, &settings, &mut app, &mut c);
    assert!(!app.metadata_window);
    assert!(c.notice().is_none());
}
