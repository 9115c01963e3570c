//! In-memory co-watch recommendation service.
//!
//! Clients report watch events over a newline-delimited TCP protocol and get
//! back videos that other viewers of the same video also watched, ranked by
//! popularity.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod server;
pub mod services;
