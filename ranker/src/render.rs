use ranker_core::{
    AppStateError, CollectionStats, ViewConfig,
    ranker_state::{AlbumRecord, CandidateAlbum},
    util::{COVER_PLACEHOLDER, or_placeholder, stars},
};

pub fn candidate_line(index: usize, candidate: &CandidateAlbum) -> String {
    format!(
        "{:>2}. {} · {} ({})  [{}]",
        index + 1,
        candidate.title,
        candidate.artist,
        or_placeholder(&candidate.year, "?"),
        candidate.external_id,
    )
}

pub fn stats_bar(stats: &CollectionStats) -> Option<String> {
    let average = stats.average_rating?;
    let top = stats.top_album?;
    Some(format!(
        "Albums Rated: {}  |  Average Rating: {average:.1} / 5.0  |  Top Album: {} ({}★)",
        stats.count, top.title, top.rating
    ))
}

pub fn list_header(view: &ViewConfig) -> String {
    match view.genre_filter.as_deref().map(str::trim) {
        Some(genre) if !genre.is_empty() => {
            format!("Sorted by {}, genre: {genre}", view.sort_by.label())
        }
        _ => format!("Sorted by {}", view.sort_by.label()),
    }
}

pub fn album_card(album: &AlbumRecord) -> String {
    let mut lines = vec![];

    let mut header = format!(
        "{} {}  {} · {}",
        if album.cover_url.is_some() { "🖼" } else { COVER_PLACEHOLDER },
        album.title,
        album.artist,
        or_placeholder(&album.year, "?"),
    );
    if !album.genre.is_empty() {
        header.push_str(&format!("  [{}]", album.genre));
    }
    lines.push(header);
    lines.push(format!("   {} {}/5", stars(album.rating), album.rating));

    if album.popularity > 0 {
        lines.push(format!("   Spotify popularity: {}/100", album.popularity));
    }
    if let Some(total_tracks) = album.total_tracks {
        let mut tracks = format!("   {total_tracks} tracks");
        if !album.label.is_empty() {
            tracks.push_str(&format!(" · {}", album.label));
        }
        lines.push(tracks);
    }
    if !album.notes.is_empty() {
        lines.push(format!("   “{}”", album.notes));
    }
    lines.push(format!("   id: {}", album.id));

    lines.join("\n")
}

pub fn error(error: &AppStateError) -> String {
    format!("{}: {}", error.display_name(), error.display_message())
}
