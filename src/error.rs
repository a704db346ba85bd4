//! 错误类型定义

use thiserror::Error;

/// 通知管线中的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// 没有提供 payload
    #[error("no input: provide --json or pipe JSON via stdin")]
    Input,

    /// payload 不是合法的 JSON 对象
    #[error("invalid JSON: {0}")]
    MalformedInput(String),

    /// PATH 上找不到富通知程序
    #[error("{0} not found on PATH")]
    RichNotifierUnavailable(String),

    /// 富通知程序执行失败
    #[error("rich notifier failed: {0}")]
    RichNotifierFailed(String),

    /// osascript 通知失败
    #[error("notify failed: {0}")]
    BaselineNotifyFailed(String),

    /// 没有注册任何渠道
    #[error("no delivery channel registered")]
    NoChannels,
}

impl NotifyError {
    /// 是否可以回退到下一个渠道
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            NotifyError::RichNotifierUnavailable(_) | NotifyError::RichNotifierFailed(_)
        )
    }
}
