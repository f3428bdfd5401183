//! 標準環境変数解決実装（std::env を委譲）
//!
//! RESOLVE_SCRIPT_API はホストの Developer/Scripting ディレクトリを指す。
//! プローブが使うのはその下の Modules。未設定（または空）ならプラットフォーム
//! 既定のインストール先を使う。

use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

pub const SCRIPT_API_ENV: &str = "RESOLVE_SCRIPT_API";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn modules_dir(&self) -> PathBuf {
        env::var(SCRIPT_API_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| PathBuf::from(s).join("Modules"))
            .unwrap_or_else(default_modules_dir)
    }
}

#[cfg(windows)]
fn default_modules_dir() -> PathBuf {
    // インストーラは %PROGRAMDATA% 配下に Modules を置く
    let program_data = env::var("PROGRAMDATA")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "C:\\ProgramData".to_string());
    PathBuf::from(program_data)
        .join("Blackmagic Design")
        .join("DaVinci Resolve")
        .join("Support")
        .join("Developer")
        .join("Scripting")
        .join("Modules")
}

#[cfg(target_os = "macos")]
fn default_modules_dir() -> PathBuf {
    PathBuf::from(
        "/Library/Application Support/Blackmagic Design/DaVinci Resolve/Developer/Scripting/Modules",
    )
}

#[cfg(all(unix, not(target_os = "macos")))]
fn default_modules_dir() -> PathBuf {
    PathBuf::from("/opt/resolve/Developer/Scripting/Modules")
}
