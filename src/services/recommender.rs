use std::cmp::Reverse;
use std::collections::HashMap;

use crate::models::VideoId;

use super::watch_store::{WatchData, WatchStore};

/// Default cap on the number of recommendations returned
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;

/// Co-watch recommender
///
/// Scores every video that shares a viewer with the target. Each co-watching
/// user adds the candidate's current popularity once, so a video co-watched by
/// `k` users scores `k * popularity`. Candidates are ranked by descending
/// score, ties broken by ascending video ID.
#[derive(Debug, Clone, Copy)]
pub struct Recommender {
    limit: usize,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(DEFAULT_RECOMMENDATION_LIMIT)
    }
}

impl Recommender {
    /// Creates a recommender returning at most `limit` videos
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Recommends videos related to `target`
    ///
    /// The whole scan runs under the store's lock. Unknown targets
    /// produce an empty list.
    pub async fn recommend(&self, store: &WatchStore, target: &VideoId) -> Vec<VideoId> {
        let recommendations = {
            let data = store.snapshot().await;
            self.rank(&data, target)
        };

        tracing::info!(
            video = %target,
            count = recommendations.len(),
            "Generated recommendations"
        );

        recommendations
    }

    pub(crate) fn rank(&self, data: &WatchData, target: &VideoId) -> Vec<VideoId> {
        let mut scores: HashMap<&VideoId, u64> = HashMap::new();

        for watched in data.watch_sets().filter(|set| set.contains(target)) {
            for video in watched.iter().filter(|video| *video != target) {
                let score = scores.entry(video).or_insert(0);
                *score = score.saturating_add(data.popularity(video));
            }
        }

        let mut ranked: Vec<(&VideoId, u64)> = scores.into_iter().collect();
        ranked.sort_unstable_by_key(|&(video, score)| (Reverse(score), video));

        ranked
            .into_iter()
            .take(self.limit)
            .map(|(video, _)| video.clone())
            .collect()
    }
}
