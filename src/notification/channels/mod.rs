//! 具体渠道实现

pub mod osascript;
pub mod terminal_notifier;

pub use osascript::OsascriptChannel;
pub use terminal_notifier::TerminalNotifierChannel;
