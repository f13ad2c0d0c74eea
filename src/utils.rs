use std::{collections::HashSet, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::types::{Album, AlbumTableRow};

/// Drops repeated album ids, keeping the first occurrence in input order.
///
/// Albums without an id cannot be told apart and are dropped as well.
pub fn remove_duplicate_albums(albums: &mut Vec<Album>) {
    let mut seen_ids = HashSet::new();
    albums.retain(|album| !album.id.is_empty() && seen_ids.insert(album.id.clone()));
}

/// Newest first by release date string; equal dates keep their order.
pub fn sort_albums_by_release_date(albums: &mut [Album]) {
    albums.sort_by(|a, b| {
        let a_date = a.release_date.as_deref().unwrap_or_default();
        let b_date = b.release_date.as_deref().unwrap_or_default();
        b_date.cmp(a_date)
    });
}

/// First four characters of a release date, or `?` when unknown.
pub fn release_year(release_date: Option<&str>) -> String {
    match release_date {
        Some(date) if !date.is_empty() => date.chars().take(4).collect(),
        _ => "?".to_string(),
    }
}

/// `1234567` becomes `1,234,567`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `1234567` becomes `1.2M`, `45600` becomes `45.6K`.
pub fn format_compact(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Turns `"Band - Album"` into `artist:Band album:Album`.
///
/// Input without the separator is passed through unchanged.
pub fn split_band_album(input: &str) -> String {
    match input.split_once(" - ") {
        Some((band, album)) => format!("artist:{} album:{}", band.trim(), album.trim()),
        None => input.trim().to_string(),
    }
}

/// Builds the search query from the resolver flags.
///
/// Band and album together win over a free-form query.
pub fn build_query(
    band: Option<&str>,
    album: Option<&str>,
    query: Option<&str>,
) -> Option<String> {
    match (band, album, query) {
        (Some(band), Some(album), _) => Some(format!("artist:{} album:{}", band, album)),
        (_, _, Some(query)) if !query.trim().is_empty() => Some(query.trim().to_string()),
        _ => None,
    }
}

/// Cuts a response body down to `max` characters for error messages.
pub fn snippet(body: &str, max: usize) -> String {
    body.chars().take(max).collect()
}

pub fn album_table_rows(albums: &[Album]) -> Vec<AlbumTableRow> {
    albums
        .iter()
        .enumerate()
        .map(|(idx, album)| AlbumTableRow {
            index: idx + 1,
            name: album.name.clone(),
            artists: album.artist_names(),
            year: release_year(album.release_date.as_deref()),
            url: album
                .share_url()
                .map(str::to_string)
                .unwrap_or_default(),
        })
        .collect()
}

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
