pub mod config;
pub mod logging;

pub mod connection;
pub mod deferred;
pub mod geometry;
pub mod hover;
pub mod lazy;
pub mod manifest;
pub mod prefs;
pub mod reveal;
pub mod scroll;
pub mod session;
pub mod warm;
