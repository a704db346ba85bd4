//! Codex notify 事件模型
//!
//! Codex CLI 的 `notify` hook 会把一个 JSON 对象作为最后一个参数传入，例如:
//!
//! ```json
//! {"type":"agent-turn-complete","thread-id":"...","turn-id":"...","cwd":"/tmp",
//!  "input-messages":["..."],"last-assistant-message":"..."}
//! ```

use crate::error::NotifyError;
use serde::{Deserialize, Deserializer};

/// 一次对话轮次触发的通知事件
///
/// 所有字段都是可选的；缺失或为 `null` 时取空值，未知字段被忽略。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Event {
    /// 事件类型，如 `agent-turn-complete`
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thread_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub turn_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cwd: String,
    /// 用户最近的输入
    #[serde(default, deserialize_with = "null_as_default")]
    pub input_messages: Vec<String>,
    /// 助手最后一条回复
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_assistant_message: String,
}

impl Event {
    /// 从原始字节解析事件
    pub fn parse(raw: &[u8]) -> Result<Self, NotifyError> {
        if raw.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(NotifyError::Input);
        }

        let value: serde_json::Value = serde_json::from_slice(raw)
            .map_err(|e| NotifyError::MalformedInput(e.to_string()))?;

        // serde 会把数组当作 struct 的序列形式接受，这里只允许对象
        if !value.is_object() {
            return Err(NotifyError::MalformedInput(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }

        serde_json::from_value(value).map_err(|e| NotifyError::MalformedInput(e.to_string()))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
