//! テスト用のProbeClient

#![allow(dead_code)]

use async_trait::async_trait;
use stackset_status::probe::ProbeClient;
use stackset_status_common::error::ProbeError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 1回分の応答（遅延 + 結果）
#[derive(Clone)]
pub struct Step {
    pub delay: Duration,
    pub result: Result<Vec<String>, ProbeError>,
}

impl Step {
    pub fn ok(delay_ms: u64, accounts: &[&str]) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Ok(accounts.iter().map(|a| a.to_string()).collect()),
        }
    }

    pub fn fail(delay_ms: u64, error: ProbeError) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Err(error),
        }
    }
}

/// 呼び出し順に台本どおり応答するクライアント
///
/// current_thread ランタイム（`#[tokio::test]` のデフォルト）では
/// プローブは起動順に開始されるので、n 番目の呼び出しが index n に対応する。
/// 台本より多く呼ばれた場合は先頭から繰り返す。
pub struct ScriptedProbeClient {
    steps: Vec<Step>,
    calls: AtomicUsize,
    targets: Mutex<Vec<String>>,
}

impl ScriptedProbeClient {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            steps,
            calls: AtomicUsize::new(0),
            targets: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProbeClient for ScriptedProbeClient {
    async fn list_accounts(&self, target_id: &str) -> Result<Vec<String>, ProbeError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.targets.lock().unwrap().push(target_id.to_string());
        let step = self.steps[call % self.steps.len()].clone();
        tokio::time::sleep(step.delay).await;
        step.result
    }
}
