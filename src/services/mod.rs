pub mod recommender;
pub mod watch_store;

pub use recommender::{Recommender, DEFAULT_RECOMMENDATION_LIMIT};
pub use watch_store::WatchStore;
