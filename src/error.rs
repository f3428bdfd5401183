//! エラーハンドリング
//!
//! プローブ本体の 2 種（取得失敗・走査失敗）は Outcome::Error に畳み込まれ、
//! use case の外へは出ない。CLI・アダプタ層の失敗のみ main まで伝播する。

use thiserror::Error as ThisError;

/// エラー型（メッセージ + 終了コードの対応を一箇所に集約）
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// 統合サーフェス自体を取得できなかった（モジュール未配置・ホスト未インストール等）
    #[error("{0}")]
    Acquisition(String),
    /// セッションチェーン走査中にサーフェスが例外を返した
    #[error("{0}")]
    Traversal(String),
    /// 引数不正（使い方の誤り）
    #[error("{0}")]
    InvalidArgument(String),
    /// I/O エラー（ログ追記・ブリッジのパイプ等）
    #[error("{0}")]
    Io(String),
    /// JSON の整形・解析エラー
    #[error("{0}")]
    Json(String),
}

impl Error {
    pub fn acquisition(msg: impl Into<String>) -> Self {
        Error::Acquisition(msg.into())
    }

    pub fn traversal(msg: impl Into<String>) -> Self {
        Error::Traversal(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    /// プロセス終了コード（sysexits 準拠: 64 = EX_USAGE, 70 = EX_SOFTWARE, 74 = EX_IOERR）
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Acquisition(_) | Error::Traversal(_) => 2,
            Error::InvalidArgument(_) => 64,
            Error::Io(_) => 74,
            Error::Json(_) => 70,
        }
    }

    /// 使い方の誤りか（main で usage を表示するか決める）
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}
