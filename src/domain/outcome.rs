//! プローブの結果型（三値）と stdout / 終了コードへの変換
//!
//! 1 回の起動につき必ずちょうど 1 つ構築され、stdout 1 行 + 終了コードに
//! 変換されてプロセスは終了する。

use crate::domain::ProjectName;

/// プローブの結果。三値のみで、部分的な結果は存在しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// チェーンが末端まで解決した。空文字列の名前も Found（NotFound とは区別）
    Found(ProjectName),
    /// サーフェスには届いたがセッション/プロジェクトが存在しない
    NotFound,
    /// 取得失敗または走査中の例外
    Error(String),
}

impl Outcome {
    /// stdout に書く 1 行（改行なし）
    pub fn stdout_line(&self) -> String {
        match self {
            Outcome::Found(name) => name.as_ref().to_string(),
            Outcome::NotFound => "NO_PROJECT".to_string(),
            Outcome::Error(msg) => format!("ERROR:{}", msg),
        }
    }

    /// プロセス終了コード（0 = 発見, 1 = なし, 2 = エラー）
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Found(_) => 0,
            Outcome::NotFound => 1,
            Outcome::Error(_) => 2,
        }
    }
}
