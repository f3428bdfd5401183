//! Python ブリッジ経由の統合サーフェス実装
//!
//! ホスト（DaVinci Resolve）のスクリプト API は同梱の Python モジュール
//! （DaVinciResolveScript）経由でしか触れないため、埋め込みのブリッジスクリプトを
//! 子プロセスとして起動し、stdin/stdout 上の JSON Lines でチェーン操作を往復する。
//!
//! プロトコル: リクエスト `{"op":"hello"|"application"|"project_manager"|
//! "current_project"|"project_name"|"quit"}`、応答 `{"ok":true,"present":bool,
//! "name":string?}` または `{"ok":false,"error":text}`。
//!
//! load() までの失敗は取得失敗（Acquisition）、以降の失敗は走査失敗（Traversal）。

use crate::error::Error;
use crate::ports::outbound::{
    now_iso8601, ApplicationHandle, EnvResolver, Log, LogLevel, LogRecord, ManagerHandle,
    ProjectHandle, ScriptingSurface, SurfaceLoader,
};
use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::{Arc, Mutex};

const BRIDGE_SOURCE: &str = include_str!("bridge.py");
const SCRIPT_MODULE_FILE: &str = "DaVinciResolveScript.py";

#[cfg(windows)]
const PYTHON: &str = "python";
#[cfg(not(windows))]
const PYTHON: &str = "python3";

/// ブリッジからの 1 応答
#[derive(Debug, Clone, Deserialize)]
struct Reply {
    ok: bool,
    #[serde(default)]
    present: bool,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn parse_reply(line: &str) -> Result<Reply, Error> {
    serde_json::from_str(line.trim())
        .map_err(|e| Error::Json(format!("malformed bridge reply: {}", e)))
}

/// ブリッジ子プロセスとのコネクション（1 接続をチェーン全体で共有する）
struct BridgeConnection {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl BridgeConnection {
    /// 1 リクエストを書いて 1 行の応答を読む
    fn request(&mut self, op: &str) -> Result<Reply, Error> {
        let line = serde_json::json!({ "op": op }).to_string();
        self.stdin
            .write_all(line.as_bytes())
            .and_then(|_| self.stdin.write_all(b"\n"))
            .and_then(|_| self.stdin.flush())
            .map_err(|e| Error::io_msg(format!("bridge write failed: {}", e)))?;
        let mut buf = String::new();
        let n = self
            .stdout
            .read_line(&mut buf)
            .map_err(|e| Error::io_msg(format!("bridge read failed: {}", e)))?;
        if n == 0 {
            return Err(Error::io_msg("bridge closed the pipe"));
        }
        parse_reply(&buf)
    }
}

fn spawn_bridge(modules_dir: &Path) -> Result<BridgeConnection, Error> {
    let mut child = Command::new(PYTHON)
        .arg("-c")
        .arg(BRIDGE_SOURCE)
        .arg(modules_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::io_msg(format!("failed to start {}: {}", PYTHON, e)))?;
    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| Error::io_msg("bridge stdin unavailable"))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| Error::io_msg("bridge stdout unavailable"))?;
    Ok(BridgeConnection {
        child,
        stdin,
        stdout: BufReader::new(stdout),
    })
}

fn request_on(conn: &Arc<Mutex<BridgeConnection>>, op: &str) -> Result<Reply, Error> {
    let mut guard = conn
        .lock()
        .map_err(|_| Error::io_msg("bridge connection poisoned"))?;
    guard.request(op)
}

/// 走査中の 1 操作。`ok:false` はサーフェス側の例外として Traversal にする。
fn traversal(conn: &Arc<Mutex<BridgeConnection>>, op: &str) -> Result<Reply, Error> {
    let reply = request_on(conn, op).map_err(|e| Error::traversal(e.to_string()))?;
    if reply.ok {
        Ok(reply)
    } else {
        Err(Error::traversal(
            reply
                .error
                .unwrap_or_else(|| format!("bridge {} failed", op)),
        ))
    }
}

/// SurfaceLoader の標準実装（ブリッジ起動 + hello 往復まで）
pub struct BridgeLoader {
    env_resolver: Arc<dyn EnvResolver>,
    log: Arc<dyn Log>,
}

impl BridgeLoader {
    pub fn new(env_resolver: Arc<dyn EnvResolver>, log: Arc<dyn Log>) -> Self {
        Self { env_resolver, log }
    }
}

impl SurfaceLoader for BridgeLoader {
    fn load(&self) -> Result<Box<dyn ScriptingSurface>, Error> {
        let modules_dir = self.env_resolver.modules_dir();
        let module_path = modules_dir.join(SCRIPT_MODULE_FILE);
        if !module_path.is_file() {
            return Err(Error::acquisition(format!(
                "scripting module not found: {}",
                module_path.display()
            )));
        }

        let conn = spawn_bridge(&modules_dir).map_err(|e| Error::acquisition(e.to_string()))?;
        let conn = Arc::new(Mutex::new(conn));

        // hello がモジュール import まで行う。ここまでの失敗はすべて取得失敗。
        let reply = request_on(&conn, "hello").map_err(|e| Error::acquisition(e.to_string()))?;
        if !reply.ok {
            return Err(Error::acquisition(
                reply
                    .error
                    .unwrap_or_else(|| "bridge hello failed".to_string()),
            ));
        }

        let _ = self.log.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Debug,
            message: "bridge started".to_string(),
            layer: Some("adapter".to_string()),
            kind: Some("bridge".to_string()),
            fields: {
                let mut m = std::collections::BTreeMap::new();
                m.insert(
                    "modules_dir".to_string(),
                    serde_json::json!(modules_dir.display().to_string()),
                );
                Some(m)
            },
        });

        Ok(Box::new(BridgeSurface { conn }))
    }
}

struct BridgeSurface {
    conn: Arc<Mutex<BridgeConnection>>,
}

impl ScriptingSurface for BridgeSurface {
    fn application(&self) -> Result<Option<Box<dyn ApplicationHandle>>, Error> {
        let reply = traversal(&self.conn, "application")?;
        if reply.present {
            Ok(Some(Box::new(BridgeApplication {
                conn: Arc::clone(&self.conn),
            })))
        } else {
            Ok(None)
        }
    }
}

impl Drop for BridgeSurface {
    fn drop(&mut self) {
        // quit はベストエフォート。子プロセスは必ず回収する。
        if let Ok(mut conn) = self.conn.lock() {
            let _ = conn.request("quit");
            let _ = conn.child.wait();
        }
    }
}

struct BridgeApplication {
    conn: Arc<Mutex<BridgeConnection>>,
}

impl ApplicationHandle for BridgeApplication {
    fn project_manager(&self) -> Result<Option<Box<dyn ManagerHandle>>, Error> {
        let reply = traversal(&self.conn, "project_manager")?;
        if reply.present {
            Ok(Some(Box::new(BridgeManager {
                conn: Arc::clone(&self.conn),
            })))
        } else {
            Ok(None)
        }
    }
}

struct BridgeManager {
    conn: Arc<Mutex<BridgeConnection>>,
}

impl ManagerHandle for BridgeManager {
    fn current_project(&self) -> Result<Option<Box<dyn ProjectHandle>>, Error> {
        let reply = traversal(&self.conn, "current_project")?;
        if reply.present {
            Ok(Some(Box::new(BridgeProject {
                conn: Arc::clone(&self.conn),
            })))
        } else {
            Ok(None)
        }
    }
}

struct BridgeProject {
    conn: Arc<Mutex<BridgeConnection>>,
}

impl ProjectHandle for BridgeProject {
    fn name(&self) -> Result<Option<String>, Error> {
        let reply = traversal(&self.conn, "project_name")?;
        if reply.present {
            // name 欠落は空名として扱う（present:true の契約上は常に付く）
            Ok(Some(reply.name.unwrap_or_default()))
        } else {
            Ok(None)
        }
    }
}
