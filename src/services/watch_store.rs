use std::collections::{HashMap, HashSet};

use tokio::sync::{Mutex, MutexGuard};

use crate::models::{UserId, VideoId};

/// Shared watch history and popularity table
///
/// Both maps live behind a single mutex. Every mutation and every
/// recommendation scan holds it exclusively for its whole duration, so a scan
/// can never observe a watch-set and a popularity count from different points
/// in time. Scans are serialized against each other as well.
#[derive(Debug, Default)]
pub struct WatchStore {
    inner: Mutex<WatchData>,
}

/// The two maps guarded by [`WatchStore`]
#[derive(Debug, Default)]
pub(crate) struct WatchData {
    history: HashMap<UserId, HashSet<VideoId>>,
    popularity: HashMap<VideoId, u64>,
}

impl WatchData {
    /// Every user's watch-set, in no particular order
    pub(crate) fn watch_sets(&self) -> impl Iterator<Item = &HashSet<VideoId>> {
        self.history.values()
    }

    /// Number of watch events recorded for a video, 0 if never watched
    pub(crate) fn popularity(&self, video: &VideoId) -> u64 {
        self.popularity.get(video).copied().unwrap_or(0)
    }

    fn record(&mut self, user: &UserId, video: &VideoId) -> u64 {
        let watched = self.history.entry(user.clone()).or_default();
        if !watched.contains(video) {
            watched.insert(video.clone());
        }

        // Counts events, so a repeat watch still increments
        let count = self.popularity.entry(video.clone()).or_insert(0);
        *count += 1;
        *count
    }
}

impl WatchStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `user` watched `video`
    ///
    /// Membership in the user's watch-set is idempotent; the video's
    /// popularity is incremented on every call. Returns the popularity after
    /// the increment.
    pub async fn record_watch(&self, user: &UserId, video: &VideoId) -> u64 {
        let popularity = self.inner.lock().await.record(user, video);

        tracing::debug!(
            user = %user,
            video = %video,
            popularity,
            "Updated watch history"
        );

        popularity
    }

    /// View of both maps, holding the lock until dropped
    pub(crate) async fn snapshot(&self) -> MutexGuard<'_, WatchData> {
        self.inner.lock().await
    }

    /// Current popularity of a video
    pub async fn popularity(&self, video: &VideoId) -> u64 {
        self.inner.lock().await.popularity(video)
    }

    /// Number of distinct videos a user has watched
    pub async fn watch_set_len(&self, user: &UserId) -> usize {
        self.inner
            .lock()
            .await
            .history
            .get(user)
            .map(HashSet::len)
            .unwrap_or(0)
    }
}
