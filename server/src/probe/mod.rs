//! プローブ（リモートのアカウント一覧APIへの1回の呼び出し）
//!
//! - [`ProbeClient`]: リモート呼び出しの抽象（本番は CloudFormation）
//! - [`ProbeRunner`]: 1回のプローブを実行し、所要時間と結果を記録する

pub mod cloudformation;
pub mod runner;

pub use cloudformation::CloudFormationProbeClient;
pub use runner::ProbeRunner;

use async_trait::async_trait;
use stackset_status_common::error::ProbeError;
use std::sync::Arc;

/// 対象IDに紐づくアカウント一覧を取得するクライアント
///
/// 同一バッチ内の全プローブから読み取り専用で共有される。
#[async_trait]
pub trait ProbeClient: Send + Sync {
    /// 対象IDのアカウントID一覧を取得（重複を含みうる）
    async fn list_accounts(&self, target_id: &str) -> Result<Vec<String>, ProbeError>;
}

/// プローブ間で共有されるクライアント
pub type SharedProbeClient = Arc<dyn ProbeClient>;
