//! osascript 渠道 - macOS 原生 `display notification`，作为最终兜底

use std::process::Command;
use tracing::{debug, info};

use crate::error::NotifyError;
use crate::notification::channel::{DeliveryChannel, NotificationContent};
use crate::notification::formatter::escape_for_script_literal;

/// osascript 渠道
pub struct OsascriptChannel {
    program: String,
}

impl OsascriptChannel {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 生成 AppleScript，所有字段都经过字面量转义
    pub fn build_script(content: &NotificationContent) -> String {
        format!(
            r#"display notification "{}" with title "{}" subtitle "{}""#,
            escape_for_script_literal(&content.body),
            escape_for_script_literal(&content.title),
            escape_for_script_literal(&content.subtitle),
        )
    }
}

impl DeliveryChannel for OsascriptChannel {
    fn name(&self) -> &str {
        "osascript"
    }

    fn attempt(&self, content: &NotificationContent) -> Result<(), NotifyError> {
        let script = Self::build_script(content);
        debug!(program = %self.program, %script, "Invoking osascript");

        let output = Command::new(&self.program)
            .arg("-e")
            .arg(&script)
            .output()
            .map_err(|e| NotifyError::BaselineNotifyFailed(e.to_string()))?;

        if output.status.success() {
            info!(channel = "osascript", "Notification delivered");
            return Ok(());
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Err(NotifyError::BaselineNotifyFailed(format!(
            "{}: {}",
            output.status,
            combined.trim()
        )))
    }
}
