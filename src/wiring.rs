//! 配線: 標準アダプタで UseCase を組み立てる

use std::path::Path;
use std::sync::Arc;

use crate::adapter::{BridgeLoader, FileJsonLog, NoopLog, StdEnvResolver, StderrLog};
use crate::ports::outbound::Log;
use crate::usecase::ProbeUseCase;

/// 組み立て済みアプリケーション
pub struct App {
    pub probe: ProbeUseCase,
    pub logger: Arc<dyn Log>,
}

/// 配線: 標準アダプタで ProbeUseCase を組み立てる
pub fn wire_probe(verbose: bool, log_file: Option<&Path>) -> App {
    let logger: Arc<dyn Log> = match log_file {
        Some(path) => Arc::new(FileJsonLog::new(path)),
        None if verbose => Arc::new(StderrLog::new()),
        None => Arc::new(NoopLog),
    };
    let env_resolver = Arc::new(StdEnvResolver);
    let loader = Arc::new(BridgeLoader::new(env_resolver, Arc::clone(&logger)));
    App {
        probe: ProbeUseCase::new(loader, Arc::clone(&logger)),
        logger,
    }
}
