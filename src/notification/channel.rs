//! 通知渠道 trait 定义

use crate::error::NotifyError;

/// 通知内容（纯文本，可包含换行，不含任何标记）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub subtitle: String,
    pub body: String,
}

impl NotificationContent {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            body: body.into(),
        }
    }
}

/// 投递渠道 - 每个渠道对应一种通知方式
pub trait DeliveryChannel {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 尝试投递一次，不重试
    fn attempt(&self, content: &NotificationContent) -> Result<(), NotifyError>;
}
