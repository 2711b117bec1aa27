use crate::{
    Res, config,
    error::Error,
    spotify::get_json,
    types::{
        Playlist, PlaylistResponse, PlaylistTracksPage, SimplifiedPlaylist, UserPlaylistsResponse,
    },
};

/// Page size for `GET /me/playlists`, the API maximum.
pub const USER_PLAYLISTS_LIMIT: u32 = 50;

/// Resolves a playlist id from a bare id, an `open.spotify.com` URL or a
/// `spotify:playlist:` URI.
///
/// # Errors
///
/// [`Error::InvalidPlaylistUrl`] when no id can be found, or the candidate
/// contains anything other than ASCII letters and digits.
pub fn extract_playlist_id(input: &str) -> Res<String> {
    let trimmed = input.trim();

    let candidate = if let Some(rest) = trimmed.strip_prefix("spotify:playlist:") {
        rest
    } else if let Some((_, rest)) = trimmed.split_once("playlist/") {
        rest.split(['?', '#', '/']).next().unwrap_or_default()
    } else {
        trimmed
    };

    if candidate.is_empty() || !candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidPlaylistUrl(input.to_string()));
    }

    Ok(candidate.to_string())
}

/// Fetches a playlist and every page of its tracks.
///
/// Requests `GET /playlists/{id}` and then follows the `tracks.next` links
/// until the last page. Track entries without a track object (removed or
/// unavailable items) are dropped; the remaining tracks keep their playlist
/// order. An empty description is returned as `None`.
///
/// # Arguments
///
/// * `token` - App or user access token
/// * `playlist_id` - Bare playlist id, see [`extract_playlist_id`]
///
/// # Returns
///
/// - `Ok(Playlist)` - Playlist with every track page resolved
/// - `Err(Error::Http)` - Network error or non-success status, including 404
///   for private playlists read with an app token
///
/// # Retry Logic
///
/// Every page goes through [`get_json`], so 502 and 429 responses are retried
/// before the error is returned.
///
/// # Example
///
/// ```
/// let playlist = get_playlist(&token, "37i9dQZF1DXcBWIGoYBM5M").await?;
/// info!("{} has {} tracks", playlist.name, playlist.tracks.len());
/// ```
pub async fn get_playlist(token: &str, playlist_id: &str) -> Res<Playlist> {
    let url = format!(
        "{uri}/playlists/{id}",
        uri = config::spotify_api_url(),
        id = playlist_id
    );
    let res: PlaylistResponse = get_json(&url, &[], token).await?;

    let mut tracks = Vec::new();
    let mut page = res.tracks;
    loop {
        tracks.extend(page.items.into_iter().filter_map(|item| item.track));
        match page.next {
            Some(next) => page = get_json::<PlaylistTracksPage>(&next, &[], token).await?,
            None => break,
        }
    }

    Ok(Playlist {
        id: res.id,
        name: res.name,
        description: res.description.filter(|d| !d.is_empty()),
        tracks,
    })
}

/// Lists the playlists of the logged-in user.
///
/// Pages through `GET /me/playlists` with [`USER_PLAYLISTS_LIMIT`] items per
/// request until Spotify stops returning a `next` link.
///
/// # Arguments
///
/// * `token` - User access token from `tunevibe auth`; app tokens are rejected
///
/// # Returns
///
/// - `Ok(Vec<SimplifiedPlaylist>)` - Owned and followed playlists in Spotify's order
/// - `Err(Error::Http)` - Network error or non-success status
pub async fn get_user_playlists(token: &str) -> Res<Vec<SimplifiedPlaylist>> {
    let first = format!("{uri}/me/playlists", uri = config::spotify_api_url());
    let mut playlists = Vec::new();

    let mut res: UserPlaylistsResponse = get_json(
        &first,
        &[("limit", USER_PLAYLISTS_LIMIT.to_string())],
        token,
    )
    .await?;

    loop {
        playlists.extend(res.items);
        match res.next {
            Some(next) => res = get_json(&next, &[], token).await?,
            None => break,
        }
    }

    Ok(playlists)
}

/// Canonical web URL for a playlist id.
pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://open.spotify.com/playlist/{}", playlist_id)
}
