//! 配置加载
//!
//! 优先级: 命令行参数 > 环境变量 > `~/.config/codex-notify/config.json` > 默认值。
//! 配置只在 CLI 入口解析一次，然后显式传给 composer / resolver / dispatcher。

use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 详细模式开关
pub const VERBOSE_ENV: &str = "CODEX_NOTIFY_VERBOSE";
/// 正文风格
pub const BODY_STYLE_ENV: &str = "CODEX_NOTIFY_BODY_STYLE";

/// 默认富通知程序
pub const DEFAULT_RICH_NOTIFIER: &str = "terminal-notifier";
/// 默认脚本解释器
pub const DEFAULT_SCRIPT_INTERPRETER: &str = "osascript";

/// 通知正文风格
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BodyStyle {
    /// 优先显示最后一条回复
    #[default]
    Concise,
    /// 固定两行: Question / Reply
    #[serde(alias = "qa")]
    #[value(alias = "qa")]
    QuestionAnswer,
}

impl BodyStyle {
    /// 宽松解析（用于环境变量）
    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "concise" => Some(BodyStyle::Concise),
            "qa" | "question-answer" | "question_answer" => Some(BodyStyle::QuestionAnswer),
            _ => None,
        }
    }
}

/// 解析布尔型环境变量: 1 / true / yes / on（不区分大小写）
pub fn parse_bool_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// 配置文件内容，所有字段可选
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body_style: Option<BodyStyle>,
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub rich_notifier: Option<String>,
    #[serde(default)]
    pub script_interpreter: Option<String>,
}

/// 从环境变量读取的设置
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    pub verbose: Option<bool>,
    pub body_style: Option<BodyStyle>,
}

impl EnvSettings {
    pub fn from_process() -> Self {
        Self {
            verbose: std::env::var(VERBOSE_ENV).ok().map(|v| parse_bool_flag(&v)),
            body_style: std::env::var(BODY_STYLE_ENV)
                .ok()
                .and_then(|v| BodyStyle::parse_loose(&v)),
        }
    }
}

/// 命令行覆盖项
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub title: Option<String>,
    pub body_style: Option<BodyStyle>,
    pub dry_run: bool,
}

/// 运行时配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub verbose: bool,
    pub body_style: BodyStyle,
    pub title: Option<String>,
    pub rich_notifier: String,
    pub script_interpreter: String,
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            body_style: BodyStyle::default(),
            title: None,
            rich_notifier: DEFAULT_RICH_NOTIFIER.to_string(),
            script_interpreter: DEFAULT_SCRIPT_INTERPRETER.to_string(),
            dry_run: false,
        }
    }
}

/// 加载结果。日志系统依赖 `verbose`，所以配置文件的告警延后输出。
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: Vec<String>,
}

impl Config {
    /// 配置文件路径
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| {
            home.join(".config")
                .join("codex-notify")
                .join("config.json")
        })
    }

    /// 从配置文件、环境变量和命令行加载
    pub fn load(overrides: ConfigOverrides) -> ConfigLoad {
        let mut warnings = Vec::new();
        let file = match Self::path() {
            Some(path) => match load_file_config(&path) {
                Ok(file) => file,
                Err(e) => {
                    warnings.push(format!("ignoring {}: {}", path.display(), e));
                    None
                }
            },
            None => None,
        };

        ConfigLoad {
            config: Self::resolve(file, EnvSettings::from_process(), overrides),
            warnings,
        }
    }

    /// 合并各层配置
    pub fn resolve(
        file: Option<FileConfig>,
        env: EnvSettings,
        overrides: ConfigOverrides,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            verbose: env.verbose.or(file.verbose).unwrap_or(defaults.verbose),
            body_style: overrides
                .body_style
                .or(env.body_style)
                .or(file.body_style)
                .unwrap_or(defaults.body_style),
            title: non_blank(overrides.title).or_else(|| non_blank(file.title)),
            rich_notifier: non_blank(file.rich_notifier).unwrap_or(defaults.rich_notifier),
            script_interpreter: non_blank(file.script_interpreter)
                .unwrap_or(defaults.script_interpreter),
            dry_run: overrides.dry_run,
        }
    }
}

/// 读取配置文件，不存在时返回 None
pub fn load_file_config(path: &Path) -> anyhow::Result<Option<FileConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let config = serde_json::from_str(&content)?;
    Ok(Some(config))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_bool_flag() {
        for on in ["1", "true", "TRUE", "Yes", "on", " ON "] {
            assert!(parse_bool_flag(on), "{on} should enable");
        }
        for off in ["", "0", "false", "no", "off", "enabled", "2"] {
            assert!(!parse_bool_flag(off), "{off} should disable");
        }
    }

    #[test]
    fn test_body_style_parse_loose() {
        assert_eq!(BodyStyle::parse_loose("concise"), Some(BodyStyle::Concise));
        assert_eq!(BodyStyle::parse_loose("QA"), Some(BodyStyle::QuestionAnswer));
        assert_eq!(
            BodyStyle::parse_loose("question-answer"),
            Some(BodyStyle::QuestionAnswer)
        );
        assert_eq!(BodyStyle::parse_loose("fancy"), None);
    }

    #[test]
    fn test_resolve_defaults() {
        let config = Config::resolve(None, EnvSettings::default(), ConfigOverrides::default());
        assert_eq!(config, Config::default());
        assert_eq!(config.rich_notifier, "terminal-notifier");
        assert_eq!(config.script_interpreter, "osascript");
    }

    #[test]
    fn test_resolve_precedence() {
        let file = FileConfig {
            title: Some("From file".into()),
            body_style: Some(BodyStyle::Concise),
            verbose: Some(true),
            rich_notifier: Some("/opt/homebrew/bin/terminal-notifier".into()),
            script_interpreter: None,
        };
        let env = EnvSettings {
            verbose: Some(false),
            body_style: Some(BodyStyle::QuestionAnswer),
        };
        let overrides = ConfigOverrides {
            title: Some("From flag".into()),
            body_style: None,
            dry_run: true,
        };

        let config = Config::resolve(Some(file), env, overrides);
        assert!(!config.verbose);
        assert_eq!(config.body_style, BodyStyle::QuestionAnswer);
        assert_eq!(config.title.as_deref(), Some("From flag"));
        assert_eq!(config.rich_notifier, "/opt/homebrew/bin/terminal-notifier");
        assert_eq!(config.script_interpreter, "osascript");
        assert!(config.dry_run);
    }

    #[test]
    fn test_blank_title_override_falls_through() {
        let file = FileConfig {
            title: Some("Codex".into()),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            title: Some("   ".into()),
            ..Default::default()
        };
        let config = Config::resolve(Some(file), EnvSettings::default(), overrides);
        assert_eq!(config.title.as_deref(), Some("Codex"));
    }

    #[test]
    fn test_load_file_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        assert!(load_file_config(&path).unwrap().is_none());

        fs::write(&path, r#"{"body_style":"qa","verbose":true,"extra":1}"#).unwrap();
        let file = load_file_config(&path).unwrap().unwrap();
        assert_eq!(file.body_style, Some(BodyStyle::QuestionAnswer));
        assert_eq!(file.verbose, Some(true));

        fs::write(&path, "not json").unwrap();
        assert!(load_file_config(&path).is_err());
    }
}
