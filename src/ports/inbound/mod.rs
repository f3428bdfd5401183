//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::cli::Config;
use crate::error::Error;

/// コマンドを実行する Inbound ポート
///
/// main はこの trait を実装した Runner の run を呼び出す。
pub trait UseCaseRunner: Send + Sync {
    fn run(&self, config: Config) -> Result<i32, Error>;
}
