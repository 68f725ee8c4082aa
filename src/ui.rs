//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. Drawing
//! only reads the controller; every change goes through the event loop.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::App;
use crate::config::{Settings, ThemeSettings, TimeField, UiSettings};
use crate::library::{Track, track_text};
use crate::player::{Controller, MediaBackend, NoticeLevel, PlaybackState};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("j/k", "up/down"),
        ("gg/G", "top/bottom"),
        ("enter", "play selected"),
        ("space/p", "play/pause"),
        ("s", "stop"),
        ("h/l", "prev/next"),
        // H/L is filled dynamically from config.
        ("+/-", "volume"),
        ("r", "loop mode"),
        ("x", "shuffle"),
        ("J/K", "move track"),
        ("d", "remove"),
        ("C", "clear"),
        ("o", "add path"),
        ("i", "metadata"),
        ("f", "follow"),
        ("esc", "dismiss"),
        ("q", "quit"),
    ])
});

/// Render the controls help text, incorporating seek seconds.
fn controls_text(seek_seconds: u64) -> String {
    let order = [
        "j/k", "h/l", "H/L", "enter", "space/p", "s", "+/-", "gg/G", "r", "x", "J/K", "d", "C",
        "o", "i", "f", "esc", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{seek_seconds}s"))
            } else {
                CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format an optional duration, rounding up partial seconds, showing total seconds.
fn format_duration_mmss_ceil(d: Option<Duration>) -> String {
    let Some(d) = d else {
        return "-".to_string();
    };

    let mut total_secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        total_secs = total_secs.saturating_add(1);
    }

    format!("{}:{:02} ({}s)", total_secs / 60, total_secs % 60, total_secs)
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text(
    elapsed: Duration,
    total: Option<Duration>,
    ui: &UiSettings,
) -> Option<String> {
    let parts: Vec<String> = ui
        .now_playing_time_fields
        .iter()
        .filter_map(|f| match (f, total) {
            (TimeField::Elapsed, _) => Some(format_mmss(elapsed)),
            (TimeField::Total, Some(t)) => Some(format_mmss(t)),
            (TimeField::Remaining, Some(t)) => {
                Some(format!("-{}", format_mmss(t.saturating_sub(elapsed))))
            }
            (_, None) => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

/// Parse a theme colour, falling back when the config value is not a colour.
fn theme_color(value: &str, fallback: Color) -> Color {
    value.trim().parse::<Color>().unwrap_or(fallback)
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn metadata_text(track: Option<&Track>) -> String {
    let Some(track) = track else {
        return "No track selected".to_string();
    };
    let number = |n: Option<u32>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
    format!(
        "Title: {}\nArtist: {}\nAlbum: {}\nYear: {}\nTrack: {}\nDuration: {}\nPath: {}",
        track.title,
        track.artist.as_deref().unwrap_or("-"),
        track.album.as_deref().unwrap_or("-"),
        number(track.year),
        number(track.track_number),
        format_duration_mmss_ceil(track.duration),
        track.path.display()
    )
}

fn status_lines<B: MediaBackend>(
    app: &App,
    controller: &Controller<B>,
    ui: &UiSettings,
    accent: Color,
) -> Vec<Line<'static>> {
    let song = match controller.current_track() {
        Some(track) => {
            let name = track_text(
                track,
                &ui.now_playing_track_fields,
                &ui.now_playing_track_separator,
            );
            let time = now_playing_time_text(controller.elapsed(), controller.duration(), ui);
            match time {
                Some(time) => format!("{name} [{time}]"),
                None => name,
            }
        }
        None => "-".to_string(),
    };

    let flags = [
        state_label(controller.state()).to_string(),
        format!("Loop: {}", controller.loop_mode().label()),
        format!("Vol: {}%", controller.volume()),
        format!("Tracks: {}", controller.playlist().len()),
        if app.follow_playback {
            "Cursor: Follow".to_string()
        } else {
            "Cursor: Free-roam".to_string()
        },
    ]
    .join(" • ");

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Now playing: ", Style::default().fg(accent)),
            Span::raw(song),
        ]),
        Line::from(flags),
    ];

    if let Some(notice) = controller.notice() {
        let color = match notice.level {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(color),
        )));
    }
    lines
}

fn bordered(title: &'static str, theme: &ThemeSettings) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme_color(&theme.accent, Color::Yellow)))
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame`.
pub fn draw<B: MediaBackend>(
    frame: &mut Frame,
    app: &App,
    controller: &Controller<B>,
    settings: &Settings,
) {
    let theme = &settings.theme;
    let accent = theme_color(&theme.accent, Color::Yellow);
    let highlight = theme_color(&theme.highlight, Color::DarkGray);

    let prompt_height = if app.prompt_open() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(prompt_height),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .title(" tangerine ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_lines(app, controller, &settings.ui, accent))
        .block(bordered(" status ", theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Main list
    {
        let tracks = controller.playlist().tracks();
        let total = tracks.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let selected = app.selected.min(total.saturating_sub(1));

        // Only build items for the visible window, keeping the cursor centred.
        let (start, end) = if total <= list_height || list_height == 0 {
            (0, total)
        } else {
            let half = list_height / 2;
            let start = selected.saturating_sub(half).min(total - list_height);
            (start, start + list_height)
        };

        let marker = match controller.state() {
            PlaybackState::Playing => "▶ ",
            PlaybackState::Paused => "‖ ",
            PlaybackState::Stopped => "■ ",
        };
        let items: Vec<ListItem> = tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let idx = start + offset;
                if controller.current() == Some(idx) {
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, Style::default().fg(accent)),
                        Span::styled(
                            track.display.clone(),
                            Style::default().fg(accent).add_modifier(Modifier::BOLD),
                        ),
                    ]))
                } else {
                    ListItem::new(format!("  {}", track.display))
                }
            })
            .collect();

        let list = List::new(items)
            .block(bordered(" playlist ", theme))
            .highlight_style(Style::default().bg(highlight))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(selected - start));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Overlay metadata popup (keeps list visible under it)
    if app.metadata_window {
        let popup_area = centered_rect_sized(72, 9, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let meta = metadata_text(controller.playlist().get(app.selected));
        let meta_paragraph = Paragraph::new(meta)
            .block(bordered(" metadata (i closes) ", theme))
            .wrap(Wrap { trim: true });
        frame.render_widget(meta_paragraph, popup_area);
    }

    if let Some(input) = app.input.as_deref() {
        let prompt = Paragraph::new(format!("{input}_"))
            .block(bordered(" add file or folder (enter adds, esc cancels) ", theme));
        frame.render_widget(prompt, chunks[3]);
    }

    let footer = Paragraph::new(controls_text(settings.controls.seek_seconds))
        .block(bordered(" controls ", theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
