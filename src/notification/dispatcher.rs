//! 通知分发器 - 按顺序尝试渠道，首个成功即停止

use super::channel::{DeliveryChannel, NotificationContent};
use super::channels::{OsascriptChannel, TerminalNotifierChannel};
use super::session::SessionContext;
use crate::config::Config;
use crate::error::NotifyError;
use tracing::warn;

/// 投递结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// 由指定渠道送达
    Delivered(String),
    /// dry-run，未实际发送
    DryRun,
}

/// 通知分发器
pub struct NotificationDispatcher {
    /// 按优先级排列的渠道，最后一个是兜底
    channels: Vec<Box<dyn DeliveryChannel>>,
    /// 是否为 dry-run 模式
    dry_run: bool,
}

impl NotificationDispatcher {
    /// 创建新的分发器
    pub fn new() -> Self {
        Self {
            channels: Vec::new(),
            dry_run: false,
        }
    }

    /// 标准两级渠道: terminal-notifier -> osascript
    pub fn standard(config: &Config, context: SessionContext) -> Self {
        let mut dispatcher = Self::new().with_dry_run(config.dry_run);
        dispatcher.register_channel(Box::new(TerminalNotifierChannel::new(
            config.rich_notifier.clone(),
            context,
        )));
        dispatcher.register_channel(Box::new(OsascriptChannel::new(
            config.script_interpreter.clone(),
        )));
        dispatcher
    }

    /// 设置 dry-run 模式
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 注册渠道（追加到末尾）
    pub fn register_channel(&mut self, channel: Box<dyn DeliveryChannel>) {
        self.channels.push(channel);
    }

    /// 投递通知
    ///
    /// 非最后一个渠道的失败只记录日志并回退；最后一个渠道的错误返回给调用方。
    pub fn deliver(&self, content: &NotificationContent) -> Result<DeliveryOutcome, NotifyError> {
        if self.dry_run {
            eprintln!("{}", self.dry_run_report(content));
            return Ok(DeliveryOutcome::DryRun);
        }

        let mut last_error = NotifyError::NoChannels;
        for (index, channel) in self.channels.iter().enumerate() {
            match channel.attempt(content) {
                Ok(()) => return Ok(DeliveryOutcome::Delivered(channel.name().to_string())),
                Err(e) => {
                    if index + 1 < self.channels.len() {
                        warn!(
                            channel = channel.name(),
                            error = %e,
                            "Channel failed, falling back"
                        );
                    }
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    /// dry-run 时输出的内容，不受日志级别影响
    pub fn dry_run_report(&self, content: &NotificationContent) -> String {
        format!(
            "[DRY-RUN] Would send to channels: {}\n  title: {}\n  subtitle: {}\n  body: {}",
            self.channel_names().join(" -> "),
            content.title,
            content.subtitle,
            content.body
        )
    }

    /// 获取已注册的渠道数量
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// 获取已注册的渠道名称
    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name()).collect()
    }
}

impl Default for NotificationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
