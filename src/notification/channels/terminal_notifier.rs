//! terminal-notifier 渠道 - 支持点击动作的富通知

use std::process::Command;
use tracing::{debug, info};

use crate::error::NotifyError;
use crate::notification::channel::{DeliveryChannel, NotificationContent};
use crate::notification::session::SessionContext;

/// terminal-notifier 渠道
pub struct TerminalNotifierChannel {
    /// 程序名或路径，在 PATH 上查找
    program: String,
    context: SessionContext,
}

impl TerminalNotifierChannel {
    pub fn new(program: impl Into<String>, context: SessionContext) -> Self {
        Self {
            program: program.into(),
            context,
        }
    }

    /// 构造命令行参数。点击执行优先于激活应用，二者最多取其一。
    pub fn build_args(&self, content: &NotificationContent) -> Vec<String> {
        let mut args = vec![
            "-title".to_string(),
            content.title.clone(),
            "-message".to_string(),
            content.body.clone(),
        ];

        if !content.subtitle.is_empty() {
            args.push("-subtitle".to_string());
            args.push(content.subtitle.clone());
        }

        if let Some(action) = &self.context.click_action {
            args.push("-execute".to_string());
            args.push(action.clone());
        } else if let Some(app) = &self.context.activate_app {
            args.push("-activate".to_string());
            args.push(app.clone());
        }

        args
    }
}

impl DeliveryChannel for TerminalNotifierChannel {
    fn name(&self) -> &str {
        "terminal-notifier"
    }

    fn attempt(&self, content: &NotificationContent) -> Result<(), NotifyError> {
        let path = which::which(&self.program)
            .map_err(|_| NotifyError::RichNotifierUnavailable(self.program.clone()))?;

        let args = self.build_args(content);
        debug!(program = %path.display(), ?args, "Invoking terminal-notifier");

        let output = Command::new(&path)
            .args(&args)
            .output()
            .map_err(|e| NotifyError::RichNotifierFailed(e.to_string()))?;

        if output.status.success() {
            info!(channel = "terminal-notifier", "Notification delivered");
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(NotifyError::RichNotifierFailed(format!(
                "{}: {}",
                output.status,
                stderr.trim()
            )))
        }
    }
}
