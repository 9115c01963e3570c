use super::command::Command;
use super::handlers;
use super::{AppState, Response};

/// Parses one command line and routes it to its handler
///
/// Parse failures become error responses; nothing is recorded for them.
pub async fn route(state: &AppState, line: &str) -> Response {
    match line.parse::<Command>() {
        Ok(Command::Watch { user, video }) => handlers::watch(state, user, video).await,
        Ok(Command::RecommendForVideo { video }) => {
            handlers::recommend_for_video(state, video).await
        }
        Err(error) => {
            tracing::debug!(%error, line, "Rejected command");
            Response::Error(error)
        }
    }
}
