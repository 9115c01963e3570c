use std::fmt::Display;

use crate::error::CommandError;
use crate::models::VideoId;

/// A reply to a single command, rendered as one line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Reply to `WATCH`: `WATCH_UPDATED, Recommendations: [...]`
    WatchUpdated(Vec<VideoId>),
    /// Reply to `RECOMMEND_FOR_VIDEO`: the bare list
    Recommendations(Vec<VideoId>),
    /// `ERROR: ...`
    Error(CommandError),
}

impl From<CommandError> for Response {
    fn from(error: CommandError) -> Self {
        Response::Error(error)
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::WatchUpdated(videos) => {
                write!(f, "WATCH_UPDATED, Recommendations: {}", render_list(videos)?)
            }
            Response::Recommendations(videos) => f.write_str(&render_list(videos)?),
            Response::Error(error) => write!(f, "ERROR: {}", error),
        }
    }
}

/// Renders video IDs as a JSON array of strings, `[]` when empty
fn render_list(videos: &[VideoId]) -> Result<String, std::fmt::Error> {
    serde_json::to_string(videos).map_err(|_| std::fmt::Error)
}
