//! ProbeRunner
//!
//! 1回のプローブを実行する。リモートの失敗は呼び出し元に伝播させず、
//! 必ず [`ProbeOutcome`] として返す（リトライはしない）。

use super::SharedProbeClient;
use stackset_status_common::{error::ProbeError, types::ProbeOutcome};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// 1回のプローブを実行するランナー
#[derive(Clone)]
pub struct ProbeRunner {
    client: SharedProbeClient,
    timeout: Option<Duration>,
}

impl ProbeRunner {
    /// タイムアウトなしのランナーを作成
    pub fn new(client: SharedProbeClient) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// プローブごとのタイムアウトを設定（None で無効）
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 設定済みのタイムアウト
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// プローブを1回実行
    pub async fn run(&self, target_id: &str, index: usize) -> ProbeOutcome {
        let started = Instant::now();

        let result = match self.timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.client.list_accounts(target_id)).await {
                    Ok(result) => result,
                    Err(_) => Err(ProbeError::Timeout(limit.as_millis() as u64)),
                }
            }
            None => self.client.list_accounts(target_id).await,
        };

        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(accounts) => ProbeOutcome::success(index, duration_ms, accounts),
            Err(err) => {
                debug!(
                    index,
                    duration_ms,
                    error = %err,
                    "Probe failed"
                );
                ProbeOutcome::failure(index, duration_ms, err.to_string())
            }
        }
    }
}
