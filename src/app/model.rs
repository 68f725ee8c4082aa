//! View state for the terminal UI: the list cursor, the path prompt and
//! popup toggles. Playback state itself lives in the controller.

/// The main application view model.
#[derive(Debug, Default)]
pub struct App {
    pub selected: usize,
    /// Cursor jumps to the now-playing track whenever it changes.
    pub follow_playback: bool,
    /// Text typed into the "add path" prompt, when it is open.
    pub input: Option<String>,
    pub metadata_window: bool,
}

impl App {
    pub fn new(follow_playback: bool) -> Self {
        Self {
            follow_playback,
            ..Self::default()
        }
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    /// Enable following playback (cursor follows currently playing track).
    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    /// Move the cursor to `playing` if following is on.
    pub fn sync_with_playback(&mut self, playing: Option<usize>) {
        if let (true, Some(idx)) = (self.follow_playback, playing) {
            self.selected = idx;
        }
    }

    /// Keep the cursor inside a list of `len` entries.
    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Move selection down, wrapping to the top.
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection up, wrapping to the bottom.
    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub fn open_prompt(&mut self) {
        self.input = Some(String::new());
    }

    pub fn prompt_open(&self) -> bool {
        self.input.is_some()
    }

    pub fn push_input_char(&mut self, c: char) {
        if let Some(buf) = self.input.as_mut() {
            buf.push(c);
        }
    }

    pub fn pop_input_char(&mut self) {
        if let Some(buf) = self.input.as_mut() {
            buf.pop();
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.input = None;
    }

    /// Close the prompt and return what was typed, with a leading `~/`
    /// expanded against `$HOME`. Blank input yields `None`.
    pub fn submit_prompt(&mut self) -> Option<String> {
        let raw = self.input.take()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match (trimmed.strip_prefix("~/"), std::env::var("HOME")) {
            (Some(rest), Ok(home)) => Some(format!("{}/{}", home.trim_end_matches('/'), rest)),
            _ => Some(trimmed.to_string()),
        }
    }
}
