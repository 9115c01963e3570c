pub mod command;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use command::Command;
pub use response::Response;
pub use routes::route;
pub use state::AppState;
