//! CLI から組み立てるコマンド

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeCommand {
    Help,
    /// ホストに問い合わせてプロジェクト名を 1 行出力する（既定動作）
    Probe,
}
