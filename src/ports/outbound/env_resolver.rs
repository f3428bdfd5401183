//! 環境変数解決 Outbound ポート

use std::path::PathBuf;

/// スクリプト API モジュールの場所を解決する
pub trait EnvResolver: Send + Sync {
    /// `DaVinciResolveScript.py` を含む Modules ディレクトリを返す。
    /// 環境変数が未設定ならプラットフォーム既定のインストール先。
    fn modules_dir(&self) -> PathBuf;
}
