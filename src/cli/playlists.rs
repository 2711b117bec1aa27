use tabled::Table;

use crate::{
    cli::spinner, error, info, management::TokenManager, spotify::playlists::get_user_playlists,
    types::PlaylistTableRow,
};

/// Lists the logged-in user's playlists so one can be picked for `analyze`
/// or `saved add`.
pub async fn playlists() {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => error!(
            "Failed to load token. Please run tunevibe auth\n Error: {}",
            e
        ),
    };

    let token = match token_mgr.get_valid_token().await {
        Ok(token) => token,
        Err(e) => error!("Cannot refresh token. Please run tunevibe auth\n Error: {}", e),
    };

    let pb = spinner("Fetching your playlists...");
    let playlists = get_user_playlists(&token).await;
    pb.finish_and_clear();

    let playlists = match playlists {
        Ok(playlists) => playlists,
        Err(e) => error!("Cannot fetch playlists: {}", e),
    };

    if playlists.is_empty() {
        info!("No playlists found for this account.");
        return;
    }

    let rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            id: p.id,
            name: p.name,
            owner: p.owner.display_name.unwrap_or_default(),
            tracks: p.tracks.total,
        })
        .collect();

    println!("{}", Table::new(rows));
}
