//! codex-notify - 把 Codex CLI 的 notify 事件转成 macOS 原生通知

pub mod cli;
pub mod config;
pub mod error;
pub mod notification;

pub use config::{BodyStyle, Config, ConfigOverrides};
pub use error::NotifyError;
pub use notification::{
    DeliveryChannel, DeliveryOutcome, Event, NotificationContent, NotificationDispatcher,
    SessionContext, SessionEnv,
};
