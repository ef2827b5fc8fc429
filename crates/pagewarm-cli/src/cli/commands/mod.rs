//! CLI command handlers. Each command is in its own file.

mod classify;
mod inspect;
mod prefs;
mod run;
mod warm;

pub use classify::run_classify;
pub use inspect::run_inspect;
pub use prefs::{run_prefs, PrefsCommand};
pub use run::run_session;
pub use warm::run_warm;
