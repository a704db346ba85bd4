//! Output formatting for CLI commands

use chrono::{DateTime, SecondsFormat, TimeZone};
use std::fmt::Display;

/// 成功确认行，例如 `ok: 2025-10-19T14:03:11+08:00`
pub fn confirmation_line<Tz: TimeZone>(now: DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("ok: {}", now.to_rfc3339_opts(SecondsFormat::Secs, false))
}

/// 单行错误信息，带 `error: ` 前缀
pub fn error_line(err: &anyhow::Error) -> String {
    let message = format!("{:#}", err);
    let single: Vec<&str> = message
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    format!("error: {}", single.join(" "))
}
