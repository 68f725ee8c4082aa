use std::path::Path;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::library::ScanEvent;
use crate::player::{BackendMessage, Controller, MediaBackend, PlaybackState};
use crate::runtime::startup::open_path;
use crate::ui;

/// What a key press asks for once the prompt is out of the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    PlaySelected,
    PlayPause,
    Stop,
    Next,
    Prev,
    SeekForward,
    SeekBackward,
    VolumeUp,
    VolumeDown,
    CycleLoop,
    Shuffle,
    RemoveSelected,
    MoveUp,
    MoveDown,
    Clear,
    CursorDown,
    CursorUp,
    CursorTop,
    CursorBottom,
    ToggleMetadata,
    ToggleFollow,
    OpenPrompt,
    Dismiss,
}

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Channels the loop drains every iteration.
pub struct Inbox<'a> {
    pub backend: &'a Receiver<BackendMessage>,
    pub scans: &'a Receiver<ScanEvent>,
    /// Handed to folder scans started from the prompt.
    pub scan_tx: &'a Sender<ScanEvent>,
}

/// Main terminal event loop: drains backend and scan events, draws, then
/// handles one key. Returns `Ok(())` when shutdown is requested.
pub fn run<B: MediaBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut Controller<B>,
    inbox: &Inbox<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::default();

    loop {
        while let Ok(ev) = inbox.backend.try_recv() {
            controller.handle_event(ev);
        }
        while let Ok(ev) = inbox.scans.try_recv() {
            controller.handle_scan(ev);
        }

        app.sync_with_playback(controller.current());
        app.clamp_selection(controller.playlist().len());

        terminal.draw(|f| ui::draw(f, app, controller, settings))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if app.prompt_open() {
            if let Some(input) = handle_prompt_key(key, app) {
                open_path(Path::new(&input), controller, &settings.library, inbox.scan_tx);
            }
            continue;
        }

        if let Some(cmd) = command_for_key(key, &mut state) {
            if handle_control_cmd(cmd, settings, app, controller) {
                return Ok(());
            }
        }
    }
}

/// Edit the path prompt. Returns the submitted text on Enter.
fn handle_prompt_key(key: KeyEvent, app: &mut App) -> Option<String> {
    match key.code {
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Enter => return app.submit_prompt(),
        KeyCode::Backspace => app.pop_input_char(),
        KeyCode::Char(c) if !c.is_control() => app.push_input_char(c),
        _ => {}
    }
    None
}

/// Map a key to a command, tracking the `gg` prefix.
fn command_for_key(key: KeyEvent, state: &mut EventLoopState) -> Option<ControlCmd> {
    if key.code == KeyCode::Char('g') && !key.modifiers.contains(KeyModifiers::CONTROL) {
        if state.pending_gg {
            state.pending_gg = false;
            return Some(ControlCmd::CursorTop);
        }
        state.pending_gg = true;
        return None;
    }
    // g pending should clear on any other key
    state.pending_gg = false;

    let cmd = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => ControlCmd::Quit,
        KeyCode::Char('q') => ControlCmd::Quit,
        KeyCode::Enter => ControlCmd::PlaySelected,
        KeyCode::Char(' ') | KeyCode::Char('p') => ControlCmd::PlayPause,
        KeyCode::Char('s') => ControlCmd::Stop,
        KeyCode::Char('l') | KeyCode::Right => ControlCmd::Next,
        KeyCode::Char('h') | KeyCode::Left => ControlCmd::Prev,
        KeyCode::Char('L') => ControlCmd::SeekForward,
        KeyCode::Char('H') => ControlCmd::SeekBackward,
        KeyCode::Char('+') | KeyCode::Char('=') => ControlCmd::VolumeUp,
        KeyCode::Char('-') => ControlCmd::VolumeDown,
        KeyCode::Char('r') => ControlCmd::CycleLoop,
        KeyCode::Char('x') => ControlCmd::Shuffle,
        KeyCode::Char('d') | KeyCode::Delete => ControlCmd::RemoveSelected,
        KeyCode::Char('K') => ControlCmd::MoveUp,
        KeyCode::Char('J') => ControlCmd::MoveDown,
        KeyCode::Char('C') => ControlCmd::Clear,
        KeyCode::Char('j') | KeyCode::Down => ControlCmd::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => ControlCmd::CursorUp,
        KeyCode::Char('G') | KeyCode::End => ControlCmd::CursorBottom,
        KeyCode::Home => ControlCmd::CursorTop,
        KeyCode::Char('i') => ControlCmd::ToggleMetadata,
        KeyCode::Char('f') => ControlCmd::ToggleFollow,
        KeyCode::Char('o') => ControlCmd::OpenPrompt,
        KeyCode::Esc => ControlCmd::Dismiss,
        _ => return None,
    };
    Some(cmd)
}

/// Apply `cmd`. Returns `true` when the app should quit.
fn handle_control_cmd<B: MediaBackend>(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut Controller<B>,
) -> bool {
    let len = controller.playlist().len();
    let seek = i64::try_from(settings.controls.seek_seconds).unwrap_or(i64::MAX);
    let step = i32::from(settings.audio.volume_step);

    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::PlaySelected => {
            if len == 0 {
                controller.play(None);
                return false;
            }
            let already_playing = controller.state() == PlaybackState::Playing
                && controller.current() == Some(app.selected);
            app.follow_playback_on();
            if !already_playing {
                controller.play(Some(app.selected));
            }
        }
        ControlCmd::PlayPause => {
            app.follow_playback_on();
            controller.toggle_play_pause();
        }
        ControlCmd::Stop => controller.stop(),
        ControlCmd::Next => {
            app.follow_playback_on();
            controller.next();
        }
        ControlCmd::Prev => {
            app.follow_playback_on();
            controller.previous();
        }
        ControlCmd::SeekForward => controller.seek_by(seek),
        ControlCmd::SeekBackward => controller.seek_by(-seek),
        ControlCmd::VolumeUp => controller.change_volume(step),
        ControlCmd::VolumeDown => controller.change_volume(-step),
        ControlCmd::CycleLoop => controller.cycle_loop_mode(),
        ControlCmd::Shuffle => {
            controller.shuffle();
            app.select_first();
        }
        ControlCmd::RemoveSelected => {
            if len > 0 {
                controller.remove_track(app.selected);
                app.clamp_selection(controller.playlist().len());
            }
        }
        ControlCmd::MoveUp => {
            app.follow_playback_off();
            if app.selected > 0 && controller.move_track(app.selected, app.selected - 1) {
                app.selected -= 1;
            }
        }
        ControlCmd::MoveDown => {
            app.follow_playback_off();
            if controller.move_track(app.selected, app.selected + 1) {
                app.selected += 1;
            }
        }
        ControlCmd::Clear => {
            controller.clear();
            app.select_first();
        }
        ControlCmd::CursorDown => {
            app.follow_playback_off();
            app.next(len);
        }
        ControlCmd::CursorUp => {
            app.follow_playback_off();
            app.prev(len);
        }
        ControlCmd::CursorTop => {
            app.follow_playback_off();
            app.select_first();
        }
        ControlCmd::CursorBottom => {
            app.follow_playback_off();
            app.select_last(len);
        }
        ControlCmd::ToggleMetadata => app.toggle_metadata_window(),
        ControlCmd::ToggleFollow => {
            if app.follow_playback {
                app.follow_playback_off();
            } else {
                app.follow_playback_on();
                app.sync_with_playback(controller.current());
            }
        }
        ControlCmd::OpenPrompt => app.open_prompt(),
        ControlCmd::Dismiss => {
            app.metadata_window = false;
            controller.clear_notice();
        }
    }

    false
}

#[cfg(test)]
mod tests;
