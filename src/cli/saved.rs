use chrono::Utc;
use tabled::Table;

use crate::{
    error, info,
    management::{AppTokenProvider, SavedPlaylistManager},
    spotify::playlists::{extract_playlist_id, get_playlist, playlist_url},
    success,
    types::{SavedPlaylist, SavedPlaylistTableRow},
    warning,
};

async fn load_store() -> SavedPlaylistManager {
    match SavedPlaylistManager::load().await {
        Ok(store) => store,
        Err(e) => error!("Cannot read saved playlists: {}", e),
    }
}

pub async fn list_saved() {
    let store = load_store().await;
    if store.count() == 0 {
        info!("No saved playlists yet. Add one with tunevibe saved add <playlist>.");
        return;
    }

    let rows: Vec<SavedPlaylistTableRow> = store
        .all()
        .iter()
        .map(|p| SavedPlaylistTableRow {
            id: p.id.clone(),
            name: p.name.clone(),
            saved: p.saved_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// Looks the playlist up on Spotify and stores its id and name.
pub async fn save(playlist: String) {
    let playlist_id = match extract_playlist_id(&playlist) {
        Ok(id) => id,
        Err(e) => error!("{}", e),
    };

    let mut tokens = AppTokenProvider::new();
    let token = match tokens.get_valid_token().await {
        Ok(token) => token,
        Err(e) => error!("Cannot obtain Spotify access token: {}", e),
    };

    let fetched = match get_playlist(&token, &playlist_id).await {
        Ok(fetched) => fetched,
        Err(e) => error!("Cannot fetch playlist {}: {}", playlist_id, e),
    };

    let mut store = load_store().await;
    let name = fetched.name.clone();
    let result = store
        .add(SavedPlaylist {
            url: playlist_url(&fetched.id),
            id: fetched.id,
            name: fetched.name,
            saved_at: Utc::now(),
        })
        .persist()
        .await;

    match result {
        Ok(_) => success!("Saved playlist '{}'", name),
        Err(e) => error!("Cannot save playlist: {}", e),
    }
}

pub async fn remove_saved(playlist: String) {
    let playlist_id = match extract_playlist_id(&playlist) {
        Ok(id) => id,
        Err(e) => error!("{}", e),
    };

    let mut store = load_store().await;
    if !store.remove(&playlist_id) {
        warning!("Playlist {} is not saved.", playlist_id);
        return;
    }

    match store.persist().await {
        Ok(_) => success!("Removed playlist {}", playlist_id),
        Err(e) => error!("Cannot update saved playlists: {}", e),
    }
}
