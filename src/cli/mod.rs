//! CLI command handling

pub mod codex_notify;
pub mod output;

pub use codex_notify::*;
pub use output::*;
