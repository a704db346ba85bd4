//! 通知管线 - 事件解析、文本组装、会话上下文与分发
//!
//! # 流程
//! 1. `Event::parse` 解析 Codex 传入的 JSON
//! 2. `formatter::compose` 生成标题、副标题、正文
//! 3. `SessionContext::resolve` 决定点击通知后的动作
//! 4. `NotificationDispatcher` 依次尝试 terminal-notifier 和 osascript
//!
//! # 使用示例
//! ```ignore
//! use codex_notify::notification::{Event, NotificationDispatcher, SessionContext, SessionEnv};
//!
//! let event = Event::parse(payload.as_bytes())?;
//! let content = formatter::compose(&event, &config, payload);
//! let context = SessionContext::resolve(&SessionEnv::from_process(), &config);
//! NotificationDispatcher::standard(&config, context).deliver(&content)?;
//! ```

pub mod channel;
pub mod channels;
pub mod dispatcher;
pub mod event;
pub mod formatter;
pub mod session;

pub use channel::{DeliveryChannel, NotificationContent};
pub use channels::{OsascriptChannel, TerminalNotifierChannel};
pub use dispatcher::{DeliveryOutcome, NotificationDispatcher};
pub use event::Event;
pub use formatter::{
    compose, compose_body, compose_subtitle, compose_title, escape_for_script_literal,
};
pub use session::{
    escape_for_shell_arg, resolve_activation_app, resolve_click_action, SessionContext,
    SessionEnv,
};
