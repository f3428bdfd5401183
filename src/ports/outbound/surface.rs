//! 統合サーフェス Outbound ポート
//!
//! ホストのスクリプト API をケイパビリティ trait の連鎖として抽象化する。
//! 各操作は `Ok(None)`（正当な不在）と `Err`（走査中の例外）を区別して返す。
//! 前段のハンドルが得られた場合にのみ次の操作を呼べる。

use crate::error::Error;

/// 統合サーフェスを取得する。取得自体が失敗しうる（モジュール未配置・ホスト未インストール）。
pub trait SurfaceLoader: Send + Sync {
    fn load(&self) -> Result<Box<dyn ScriptingSurface>, Error>;
}

/// 取得済みのスクリプト API。アプリケーションハンドルの照会のみを提供する。
pub trait ScriptingSurface: Send {
    /// `Ok(None)` = サーフェスには届くがホストがセッションを開いていない
    fn application(&self) -> Result<Option<Box<dyn ApplicationHandle>>, Error>;
}

pub trait ApplicationHandle: Send {
    fn project_manager(&self) -> Result<Option<Box<dyn ManagerHandle>>, Error>;
}

pub trait ManagerHandle: Send {
    fn current_project(&self) -> Result<Option<Box<dyn ProjectHandle>>, Error>;
}

pub trait ProjectHandle: Send {
    /// `Ok(Some(""))` もありうる（空名のプロジェクトは不在ではない）
    fn name(&self) -> Result<Option<String>, Error>;
}
