//! 通知文本组装 - 标题 / 副标题 / 正文

use super::channel::NotificationContent;
use super::event::Event;
use crate::config::{BodyStyle, Config};

/// 没有标题来源时的默认标题
pub const DEFAULT_TITLE: &str = "Agent Notification";
/// 副标题中缺失字段的占位符
const PLACEHOLDER: &str = "-";
/// 副标题保留的 thread id 后缀长度
const THREAD_SUFFIX_LEN: usize = 8;

/// 组装完整的通知内容
///
/// 详细模式下正文直接显示原始 payload，便于排查 Codex 实际发送了什么。
pub fn compose(event: &Event, config: &Config, raw_payload: &str) -> NotificationContent {
    let body = if config.verbose {
        raw_payload.trim().to_string()
    } else {
        compose_body(event, config.body_style)
    };

    NotificationContent {
        title: compose_title(event, config.title.as_deref()),
        subtitle: compose_subtitle(event),
        body,
    }
}

/// 标题: 显式覆盖 > 事件类型 > 默认值
pub fn compose_title(event: &Event, title_override: Option<&str>) -> String {
    title_override
        .and_then(non_blank)
        .or_else(|| non_blank(&event.kind))
        .unwrap_or(DEFAULT_TITLE)
        .to_string()
}

/// 副标题: `turn {turn_id} • thread {thread_id 后 8 位}`
pub fn compose_subtitle(event: &Event) -> String {
    // 空白只用来判断是否缺失，输出保留原值
    let turn = if is_blank(&event.turn_id) {
        PLACEHOLDER
    } else {
        event.turn_id.as_str()
    };
    let thread = if is_blank(&event.thread_id) {
        PLACEHOLDER
    } else {
        thread_suffix(&event.thread_id)
    };
    format!("turn {} • thread {}", turn, thread)
}

/// 按字符截取末尾 8 位，避免切到 UTF-8 多字节字符中间
fn thread_suffix(thread_id: &str) -> &str {
    let count = thread_id.chars().count();
    if count <= THREAD_SUFFIX_LEN {
        return thread_id;
    }
    let start = thread_id
        .char_indices()
        .nth(count - THREAD_SUFFIX_LEN)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &thread_id[start..]
}

/// 正文
pub fn compose_body(event: &Event, style: BodyStyle) -> String {
    match style {
        BodyStyle::Concise => compose_concise_body(event),
        BodyStyle::QuestionAnswer => compose_qa_body(event),
    }
}

fn compose_concise_body(event: &Event) -> String {
    if non_blank(&event.last_assistant_message).is_some() {
        return event.last_assistant_message.clone();
    }
    if let Some(question) = joined_input(event) {
        return question;
    }
    if let Some(cwd) = non_blank(&event.cwd) {
        return format!("cwd: {}", cwd);
    }
    "Task notification".to_string()
}

fn compose_qa_body(event: &Event) -> String {
    let question = joined_input(event).unwrap_or_else(|| "(none)".to_string());
    let reply = non_blank(&event.last_assistant_message).unwrap_or("(no reply)");
    format!("Question: {}\nReply: {}", question.trim(), reply)
}

/// 用空格拼接非空白的输入消息
fn joined_input(event: &Event) -> Option<String> {
    let parts: Vec<&str> = event
        .input_messages
        .iter()
        .map(String::as_str)
        .filter(|m| !m.trim().is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// 转义后可嵌入 AppleScript 双引号字符串（经 `osascript -e` 执行）
///
/// 顺序不可调换: 先统一换行，再转反斜杠，最后转双引号。
pub fn escape_for_script_literal(s: &str) -> String {
    s.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
}
