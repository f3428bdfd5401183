//! Outbound ポートの標準実装（アダプタ）

pub mod bridge;
pub mod console;
pub mod file_json_log;
pub mod std_env_resolver;
pub mod stderr_log;

pub use bridge::BridgeLoader;
pub use file_json_log::{FileJsonLog, NoopLog};
pub use std_env_resolver::StdEnvResolver;
pub use stderr_log::StderrLog;
