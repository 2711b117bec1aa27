use std::{io::ErrorKind, path::PathBuf};

use crate::{Res, config, types::SavedPlaylist};

/// Playlists the user saved for later analysis, cached as a JSON list.
///
/// The default file lives at `<data_local_dir>/tunevibe/cache/saved-playlists.json`.
/// Changes stay in memory until [`persist`](Self::persist) writes the whole
/// list back.
///
/// # Example
///
/// ```
/// let mut store = SavedPlaylistManager::load().await?;
/// store.add(playlist).persist().await?;
///
/// if store.remove("37i9dQZF1DXcBWIGoYBM5M") {
///     store.persist().await?;
/// }
/// ```
pub struct SavedPlaylistManager {
    path: PathBuf,
    playlists: Vec<SavedPlaylist>,
}

impl SavedPlaylistManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            playlists: Vec::new(),
        }
    }

    /// Loads the store from its default location.
    pub async fn load() -> Res<Self> {
        Self::load_from(Self::cache_path()).await
    }

    /// Loads a store file; a missing file yields an empty store.
    pub async fn load_from(path: PathBuf) -> Res<Self> {
        let playlists = match async_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, playlists })
    }

    pub async fn persist(&self) -> Res<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.playlists)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Adds a playlist, replacing an existing entry with the same id.
    pub fn add(&mut self, playlist: SavedPlaylist) -> &mut Self {
        match self.playlists.iter_mut().find(|p| p.id == playlist.id) {
            Some(existing) => *existing = playlist,
            None => self.playlists.push(playlist),
        }
        self
    }

    /// Removes the playlist with `id`, returning whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.playlists.len();
        self.playlists.retain(|p| p.id != id);
        self.playlists.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&SavedPlaylist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    pub fn all(&self) -> &[SavedPlaylist] {
        &self.playlists
    }

    pub fn count(&self) -> usize {
        self.playlists.len()
    }

    fn cache_path() -> PathBuf {
        config::data_dir().join("cache/saved-playlists.json")
    }
}
