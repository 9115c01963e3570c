use std::str::FromStr;

use crate::error::CommandError;
use crate::models::{UserId, VideoId};

pub const WATCH: &str = "WATCH";
pub const RECOMMEND_FOR_VIDEO: &str = "RECOMMEND_FOR_VIDEO";

/// A parsed client command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `WATCH <userID> <videoID>`
    Watch { user: UserId, video: VideoId },
    /// `RECOMMEND_FOR_VIDEO <videoID>`
    RecommendForVideo { video: VideoId },
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parses one command line
    ///
    /// Tokens are whitespace separated and the keyword must match exactly.
    /// Tokens past the ones a command needs are ignored.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some(WATCH) => match (tokens.next(), tokens.next()) {
                (Some(user), Some(video)) => Ok(Command::Watch {
                    user: UserId::from(user),
                    video: VideoId::from(video),
                }),
                _ => Err(CommandError::InvalidWatch),
            },
            Some(RECOMMEND_FOR_VIDEO) => tokens
                .next()
                .map(|video| Command::RecommendForVideo {
                    video: VideoId::from(video),
                })
                .ok_or(CommandError::InvalidRecommendForVideo),
            _ => Err(CommandError::Unrecognized),
        }
    }
}
