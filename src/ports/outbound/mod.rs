//! Outbound ポート: アプリが外界（ホストのスクリプト API・環境変数・ログ）を使うための trait

pub mod env_resolver;
pub mod log;
pub mod surface;

pub use env_resolver::EnvResolver;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
pub use surface::{
    ApplicationHandle, ManagerHandle, ProjectHandle, ScriptingSurface, SurfaceLoader,
};
