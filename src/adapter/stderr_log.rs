//! 人間向けログ（-v 時に stderr へ要点のみ出力）
//!
//! stdout の 1 行契約を守るため stderr のみに書く。fields の全量は出さず
//! 要点のみ（巨大化防止）。

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};

const FIELDS_SUMMARY_MAX: usize = 400;

/// fields の要点だけを短い文字列にする（巨大化防止）
fn fields_summary(record: &LogRecord) -> String {
    let fields = match &record.fields {
        Some(f) if !f.is_empty() => f,
        _ => return String::new(),
    };
    let s = serde_json::to_string(fields).unwrap_or_default();
    if s.len() <= FIELDS_SUMMARY_MAX {
        return s;
    }
    let truncated = s.chars().take(FIELDS_SUMMARY_MAX).collect::<String>();
    format!("{}... (len={})", truncated, s.len())
}

fn level_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
    }
}

/// -v / --verbose 用の Log 実装
#[derive(Debug, Clone, Default)]
pub struct StderrLog;

impl StderrLog {
    pub fn new() -> Self {
        Self
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let summary = fields_summary(record);
        if summary.is_empty() {
            eprintln!(
                "[probe] {} {}: {}",
                record.ts,
                level_str(record.level),
                record.message
            );
        } else {
            eprintln!(
                "[probe] {} {}: {} {}",
                record.ts,
                level_str(record.level),
                record.message,
                summary
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::now_iso8601;
    use std::collections::BTreeMap;

    #[test]
    fn test_fields_summary_empty_when_absent() {
        let rec = LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Debug,
            message: "x".to_string(),
            layer: None,
            kind: None,
            fields: None,
        };
        assert_eq!(fields_summary(&rec), "");
    }

    #[test]
    fn test_fields_summary_truncates_large_payload() {
        let mut m = BTreeMap::new();
        m.insert("blob".to_string(), serde_json::json!("x".repeat(1000)));
        let rec = LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "x".to_string(),
            layer: None,
            kind: None,
            fields: Some(m),
        };
        let summary = fields_summary(&rec);
        assert!(summary.contains("... (len="));
        assert!(summary.len() < 500);
    }

    #[test]
    fn test_stderr_log_never_fails() {
        let rec = LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Warn,
            message: "bridge reply malformed".to_string(),
            layer: Some("adapter".to_string()),
            kind: Some("bridge".to_string()),
            fields: None,
        };
        assert!(StderrLog::new().log(&rec).is_ok());
    }
}
