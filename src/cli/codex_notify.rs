// src/cli/codex_notify.rs
//! Codex CLI notify 命令处理
//!
//! Codex 在每轮对话结束时执行 `notify` 配置的命令，并把事件 JSON 作为最后一个参数传入。

use crate::config::{BodyStyle, Config, ConfigOverrides};
use crate::error::NotifyError;
use crate::notification::{
    formatter, DeliveryOutcome, Event, NotificationContent, NotificationDispatcher,
    SessionContext, SessionEnv,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::io::{self, IsTerminal, Read};
use tracing::{debug, info};

use super::output::confirmation_line;

/// Codex notify 命令参数
#[derive(Args, Debug, Default)]
pub struct CodexNotifyArgs {
    /// JSON payload from Codex notify (passed as command line argument)
    pub payload: Option<String>,

    /// JSON payload (takes priority over the positional argument; falls back to stdin)
    #[arg(long = "json", value_name = "JSON")]
    pub json: Option<String>,

    /// Override notification title
    #[arg(long)]
    pub title: Option<String>,

    /// Body style
    #[arg(long, value_enum)]
    pub body_style: Option<BodyStyle>,

    /// Compose and log the notification without sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl CodexNotifyArgs {
    /// 命令行层的配置覆盖
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            title: self.title.clone(),
            body_style: self.body_style,
            dry_run: self.dry_run,
        }
    }

    /// 参数中的 payload，`--json` 优先
    fn inline_payload(&self) -> Option<&str> {
        self.json
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.payload.as_deref().filter(|s| !s.is_empty()))
    }
}

/// 读取 payload: 参数优先，否则读 stdin（stdin 为终端时视为无输入）
pub fn read_payload(args: &CodexNotifyArgs) -> Result<String, NotifyError> {
    if let Some(payload) = args.inline_payload() {
        return Ok(payload.to_string());
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(NotifyError::Input);
    }

    read_stdin_payload(stdin.lock())
}

/// 读完整个 reader。非 UTF-8 内容算格式错误，其余 I/O 错误视为无输入。
fn read_stdin_payload<R: Read>(mut reader: R) -> Result<String, NotifyError> {
    let mut buf = String::new();
    match reader.read_to_string(&mut buf) {
        Ok(_) => Ok(buf),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            Err(NotifyError::MalformedInput(e.to_string()))
        }
        Err(e) => {
            debug!(error = %e, "Failed to read payload from stdin");
            Err(NotifyError::Input)
        }
    }
}

/// 解析、组装并投递。解析失败时不会尝试任何渠道。
pub fn process_payload(
    raw: &str,
    config: &Config,
    dispatcher: &NotificationDispatcher,
) -> Result<(NotificationContent, DeliveryOutcome), NotifyError> {
    let event = Event::parse(raw.as_bytes())?;
    debug!(?event, "Parsed Codex notify event");

    let content = formatter::compose(&event, config, raw);
    let outcome = dispatcher.deliver(&content)?;
    Ok((content, outcome))
}

/// 处理 Codex notify 事件
pub fn handle_codex_notify(args: CodexNotifyArgs, config: &Config) -> Result<()> {
    let raw = read_payload(&args)?;

    let context = SessionContext::resolve(&SessionEnv::from_process(), config);
    let dispatcher = NotificationDispatcher::standard(config, context);

    let (content, outcome) = process_payload(&raw, config, &dispatcher)?;
    info!(?outcome, title = %content.title, subtitle = %content.subtitle, "Notification handled");

    if config.verbose {
        println!("{}", confirmation_line(Local::now()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::DeliveryChannel;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingChannel {
        attempts: Rc<Cell<usize>>,
    }

    impl DeliveryChannel for CountingChannel {
        fn name(&self) -> &str {
            "counting"
        }

        fn attempt(&self, _content: &NotificationContent) -> Result<(), NotifyError> {
            self.attempts.set(self.attempts.get() + 1);
            Ok(())
        }
    }

    fn counting_dispatcher() -> (NotificationDispatcher, Rc<Cell<usize>>) {
        let attempts = Rc::new(Cell::new(0));
        let mut dispatcher = NotificationDispatcher::new();
        dispatcher.register_channel(Box::new(CountingChannel {
            attempts: attempts.clone(),
        }));
        (dispatcher, attempts)
    }

    #[test]
    fn test_codex_notify_args() {
        let payload =
            r#"{"type":"agent-turn-complete","thread-id":"abc","turn-id":"def","cwd":"/tmp"}"#;
        let args = CodexNotifyArgs {
            payload: Some(payload.to_string()),
            ..Default::default()
        };
        assert_eq!(read_payload(&args).unwrap(), payload);
    }

    #[test]
    fn test_json_flag_takes_priority() {
        let args = CodexNotifyArgs {
            payload: Some("{\"turn-id\":\"positional\"}".into()),
            json: Some("{\"turn-id\":\"flag\"}".into()),
            ..Default::default()
        };
        assert_eq!(read_payload(&args).unwrap(), "{\"turn-id\":\"flag\"}");
    }

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn test_read_stdin_payload() {
        let raw = br#"{"turn-id":"t1"}"#;
        assert_eq!(read_stdin_payload(&raw[..]).unwrap(), r#"{"turn-id":"t1"}"#);
    }

    #[test]
    fn test_stdin_invalid_utf8_is_malformed() {
        let err = read_stdin_payload(&[0xff, 0xfe, 0x7b][..]).unwrap_err();
        assert!(matches!(err, NotifyError::MalformedInput(_)), "{err}");
    }

    #[test]
    fn test_stdin_io_error_is_input_error() {
        assert_eq!(read_stdin_payload(BrokenPipe).unwrap_err(), NotifyError::Input);
    }

    #[test]
    fn test_process_payload_concise() {
        let (dispatcher, attempts) = counting_dispatcher();
        let raw = r#"{"turn-id":"t1","thread-id":"abcdefghij","last-assistant-message":"Done."}"#;

        let (content, outcome) = process_payload(raw, &Config::default(), &dispatcher).unwrap();
        assert_eq!(content.subtitle, "turn t1 • thread cdefghij");
        assert_eq!(content.body, "Done.");
        assert_eq!(content.title, "Agent Notification");
        assert_eq!(outcome, DeliveryOutcome::Delivered("counting".into()));
        assert_eq!(attempts.get(), 1);
    }

    #[test]
    fn test_process_payload_empty_object() {
        let (dispatcher, _) = counting_dispatcher();

        let (content, _) = process_payload("{}", &Config::default(), &dispatcher).unwrap();
        assert_eq!(content.subtitle, "turn - • thread -");
        assert_eq!(content.body, "Task notification");

        let config = Config {
            body_style: BodyStyle::QuestionAnswer,
            ..Default::default()
        };
        let (content, _) = process_payload("{}", &config, &dispatcher).unwrap();
        assert_eq!(content.body, "Question: (none)\nReply: (no reply)");
    }

    #[test]
    fn test_malformed_payload_makes_no_attempt() {
        let (dispatcher, attempts) = counting_dispatcher();

        let err = process_payload("definitely not json", &Config::default(), &dispatcher)
            .unwrap_err();
        assert!(matches!(err, NotifyError::MalformedInput(_)));
        assert_eq!(attempts.get(), 0);
    }
}
