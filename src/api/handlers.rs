use crate::models::{UserId, VideoId};

use super::{AppState, Response};

/// Records a watch event, then recommends videos related to the one watched
pub async fn watch(state: &AppState, user: UserId, video: VideoId) -> Response {
    state.store.record_watch(&user, &video).await;

    let recommendations = state.recommender.recommend(&state.store, &video).await;
    Response::WatchUpdated(recommendations)
}

/// Recommends videos related to `video` without recording anything
pub async fn recommend_for_video(state: &AppState, video: VideoId) -> Response {
    let recommendations = state.recommender.recommend(&state.store, &video).await;
    Response::Recommendations(recommendations)
}
