use std::path::Path;

use crate::config::TrackDisplayField;

use super::model::Track;

/// Build a display string for a track according to the provided `fields` and separator.
///
/// This composes metadata fields (artist, title, album, filename, path) in the
/// configured order and falls back to `title` when no parts were produced.
pub fn display_from_fields(
    path: &Path,
    title: &str,
    artist: Option<&str>,
    album: Option<&str>,
    fields: &[TrackDisplayField],
    sep: &str,
) -> String {
    let parts: Vec<String> = fields
        .iter()
        .flat_map(|f| field_parts(*f, path, title, artist, album, None))
        .collect();

    if parts.is_empty() {
        title.to_string()
    } else {
        parts.join(sep)
    }
}

/// Same as [`display_from_fields`] but for an already built track, where
/// `Display` means the stored display string.
pub fn track_text(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let parts: Vec<String> = fields
        .iter()
        .flat_map(|f| {
            field_parts(
                *f,
                &track.path,
                &track.title,
                track.artist.as_deref(),
                track.album.as_deref(),
                Some(&track.display),
            )
        })
        .collect();

    if parts.is_empty() {
        track.display.clone()
    } else {
        parts.join(sep)
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn field_parts(
    field: TrackDisplayField,
    path: &Path,
    title: &str,
    artist: Option<&str>,
    album: Option<&str>,
    display: Option<&str>,
) -> Vec<String> {
    match field {
        TrackDisplayField::Display => match non_blank(display) {
            Some(d) => vec![d],
            // No stored display yet: treat it as "artist - title".
            None => non_blank(artist)
                .into_iter()
                .chain(non_blank(Some(title)))
                .collect(),
        },
        TrackDisplayField::Title => non_blank(Some(title)).into_iter().collect(),
        TrackDisplayField::Artist => non_blank(artist).into_iter().collect(),
        TrackDisplayField::Album => non_blank(album).into_iter().collect(),
        TrackDisplayField::Filename => non_blank(path.file_stem().and_then(|s| s.to_str()))
            .into_iter()
            .collect(),
        TrackDisplayField::Path => vec![path.display().to_string()],
    }
}
