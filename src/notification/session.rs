//! 会话上下文 - 点击通知跳回发起任务的 iTerm2 会话
//!
//! 只有在 iTerm2 中运行（存在 `ITERM_SESSION_ID`）时才提供点击动作:
//! - 找到激活脚本时，点击执行 `osascript <script> <session-id>` 精确跳转到该会话；
//! - 否则退而求其次，仅把 iTerm2 切到前台。

use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;

/// iTerm2 会话 ID
pub const SESSION_ID_ENV: &str = "ITERM_SESSION_ID";
/// 激活脚本路径覆盖
pub const FOCUS_SCRIPT_ENV: &str = "CODEX_NOTIFY_FOCUS_SCRIPT";
/// 默认脚本名，位于可执行文件目录下的 `scripts/`
pub const FOCUS_SCRIPT_NAME: &str = "focus-iterm-session.applescript";
/// iTerm2 bundle id
pub const ITERM_BUNDLE_ID: &str = "com.googlecode.iterm2";

/// 解析所需的环境快照
#[derive(Debug, Clone, Default)]
pub struct SessionEnv {
    pub session_id: Option<String>,
    pub script_override: Option<PathBuf>,
    pub exe_dir: Option<PathBuf>,
}

impl SessionEnv {
    /// 读取当前进程的环境
    pub fn from_process() -> Self {
        Self {
            session_id: env::var(SESSION_ID_ENV).ok(),
            script_override: env::var_os(FOCUS_SCRIPT_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            exe_dir: env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
        }
    }

    fn session_id(&self) -> Option<&str> {
        self.session_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// 激活脚本候选路径: 覆盖变量优先，其次 `<exe-dir>/scripts/<name>`
    fn script_candidates(&self) -> Vec<PathBuf> {
        let default = self
            .exe_dir
            .as_ref()
            .map(|dir| dir.join("scripts").join(FOCUS_SCRIPT_NAME));
        self.script_override.iter().cloned().chain(default).collect()
    }

    /// 第一个存在的候选脚本
    fn script_path(&self) -> Option<PathBuf> {
        let candidates = self.script_candidates();
        let found = candidates.iter().find(|path| path.is_file()).cloned();
        if found.is_none() {
            debug!(?candidates, "Focus script not found");
        }
        found
    }
}

/// 投递时的会话上下文
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// 点击后执行的命令
    pub click_action: Option<String>,
    /// 点击后激活的应用
    pub activate_app: Option<String>,
}

impl SessionContext {
    pub fn resolve(session_env: &SessionEnv, config: &Config) -> Self {
        let context = Self {
            click_action: resolve_click_action(session_env, &config.script_interpreter),
            activate_app: resolve_activation_app(session_env),
        };
        debug!(?context, "Resolved session context");
        context
    }
}

/// 构造点击跳转命令，不满足条件时返回 None
pub fn resolve_click_action(session_env: &SessionEnv, interpreter: &str) -> Option<String> {
    let session_id = session_env.session_id()?;
    let script = session_env.script_path()?;

    Some(format!(
        "{} \"{}\" \"{}\"",
        interpreter,
        escape_for_shell_arg(&script.to_string_lossy()),
        escape_for_shell_arg(session_id)
    ))
}

/// 存在会话 ID 时返回 iTerm2 的 bundle id
pub fn resolve_activation_app(session_env: &SessionEnv) -> Option<String> {
    session_env
        .session_id()
        .map(|_| ITERM_BUNDLE_ID.to_string())
}

/// 转义后可放入 shell 双引号参数
///
/// terminal-notifier 会再经一层 shell 执行 `-execute` 的内容，
/// 所以这里比 AppleScript 字面量多转义反引号和 `$`。反斜杠必须最先处理。
pub fn escape_for_shell_arg(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('`', "\\`")
        .replace('$', "\\$")
}
