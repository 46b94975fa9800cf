//! Stack-Set Status Server
//!
//! スタックセットのインスタンス一覧APIに同時プローブを送り、
//! アカウント一覧とレイテンシ統計を返すHTTPサービス

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// プローブ結果の集約
pub mod aggregator;

/// CLIインターフェース
pub mod cli;

/// ロギング初期化ユーティリティ
pub mod logging;

/// リモート呼び出しとプローブ実行
pub mod probe;

/// プローブのファンアウト
pub mod scheduler;

/// axumサーバー起動・シャットダウンハンドリング
pub mod server;

use probe::{ProbeRunner, SharedProbeClient};
use stackset_status_common::config::ProbeSettings;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// プローブスケジューラー
    pub scheduler: scheduler::FanOutScheduler,
}

impl AppState {
    /// クライアントとプローブ設定から状態を作成
    pub fn new(client: SharedProbeClient, probe: &ProbeSettings) -> Self {
        let runner = ProbeRunner::new(client).with_timeout(probe.timeout());
        let scheduler =
            scheduler::FanOutScheduler::new(runner).with_max_num_requests(probe.max_num_requests);
        Self { scheduler }
    }
}
