//! 防御的逐次プローブ（アダプター経由でホストに問い合わせる）
//!
//! application → project manager → current project → name を左から右へ一度だけ
//! 辿り、三値の Outcome をちょうど 1 つ返す。前段が不在/失敗なら後段は呼ばない。
//! サーフェス由来のエラーはここで Outcome::Error に畳み込み、境界の外へは
//! 何も伝播させない。リトライはしない。

use crate::domain::{Outcome, ProjectName};
use crate::ports::outbound::{now_iso8601, Log, LogLevel, LogRecord, SurfaceLoader};
use std::sync::Arc;

/// プローブのユースケース
pub struct ProbeUseCase {
    loader: Arc<dyn SurfaceLoader>,
    log: Arc<dyn Log>,
}

impl ProbeUseCase {
    pub fn new(loader: Arc<dyn SurfaceLoader>, log: Arc<dyn Log>) -> Self {
        Self { loader, log }
    }

    /// チェーンを辿って Outcome を 1 つ構築する。panic も Err も返さない。
    pub fn probe(&self) -> Outcome {
        let surface = match self.loader.load() {
            Ok(s) => s,
            Err(e) => {
                let msg = e.to_string();
                self.log_step(LogLevel::Error, "surface acquisition failed", Some(&msg));
                return Outcome::Error(msg);
            }
        };
        self.log_step(LogLevel::Debug, "surface acquired", None);

        let application = match surface.application() {
            Ok(Some(a)) => a,
            Ok(None) => {
                self.log_step(LogLevel::Debug, "application not running", None);
                return Outcome::NotFound;
            }
            Err(e) => return self.traversal_error("application", e),
        };

        let manager = match application.project_manager() {
            Ok(Some(m)) => m,
            Ok(None) => {
                self.log_step(LogLevel::Debug, "no project manager", None);
                return Outcome::NotFound;
            }
            Err(e) => return self.traversal_error("project_manager", e),
        };

        let project = match manager.current_project() {
            Ok(Some(p)) => p,
            Ok(None) => {
                self.log_step(LogLevel::Debug, "no current project", None);
                return Outcome::NotFound;
            }
            Err(e) => return self.traversal_error("current_project", e),
        };

        match project.name() {
            // 空文字列も Found（「プロジェクトなし」とは区別する）
            Ok(Some(name)) => {
                self.log_step(LogLevel::Debug, "project name resolved", None);
                Outcome::Found(ProjectName::new(name))
            }
            Ok(None) => {
                self.log_step(LogLevel::Debug, "project has no name", None);
                Outcome::NotFound
            }
            Err(e) => self.traversal_error("project_name", e),
        }
    }

    fn traversal_error(&self, step: &str, e: crate::error::Error) -> Outcome {
        let _ = self.log.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Error,
            message: format!("traversal failed at {}", step),
            layer: Some("usecase".to_string()),
            kind: Some("probe".to_string()),
            fields: {
                let mut m = std::collections::BTreeMap::new();
                m.insert("error".to_string(), serde_json::json!(e.to_string()));
                Some(m)
            },
        });
        Outcome::Error(e.to_string())
    }

    fn log_step(&self, level: LogLevel, message: &str, error: Option<&str>) {
        let _ = self.log.log(&LogRecord {
            ts: now_iso8601(),
            level,
            message: message.to_string(),
            layer: Some("usecase".to_string()),
            kind: Some("probe".to_string()),
            fields: error.map(|e| {
                let mut m = std::collections::BTreeMap::new();
                m.insert("error".to_string(), serde_json::json!(e));
                m
            }),
        });
    }
}
