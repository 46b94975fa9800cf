//! FanOutScheduler
//!
//! 1リクエスト分のプローブを同時に起動し、全完了を待って
//! index順の [`ProbeBatch`] にまとめる。
//!
//! 各タスクは自分の結果を返すだけで、共有コレクションには書き込まない。
//! 途中で失敗したプローブがあってもバッチは打ち切らない。

use crate::probe::ProbeRunner;
use futures::future::join_all;
use stackset_status_common::{
    error::{StatusError, StatusResult},
    types::ProbeBatch,
};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// プローブのファンアウトスケジューラー
#[derive(Clone)]
pub struct FanOutScheduler {
    runner: ProbeRunner,
    max_num_requests: Option<u32>,
}

impl FanOutScheduler {
    /// 新しいスケジューラーを作成（プローブ回数の上限なし）
    pub fn new(runner: ProbeRunner) -> Self {
        Self {
            runner,
            max_num_requests: None,
        }
    }

    /// 1バッチあたりのプローブ回数の上限を設定
    pub fn with_max_num_requests(mut self, max_num_requests: u32) -> Self {
        self.max_num_requests = Some(max_num_requests);
        self
    }

    /// 入力を検証し、前後の空白を除いた対象IDを返す
    fn validate<'a>(&self, target_id: &'a str, num_requests: u32) -> StatusResult<&'a str> {
        let target_id = target_id.trim();
        if target_id.is_empty() {
            return Err(StatusError::InvalidRequest(
                "stack_set_id must not be empty".to_string(),
            ));
        }
        if num_requests < 1 {
            return Err(StatusError::InvalidRequest(
                "num_requests must be at least 1".to_string(),
            ));
        }
        if let Some(max) = self.max_num_requests {
            if num_requests > max {
                return Err(StatusError::InvalidRequest(format!(
                    "num_requests must be between 1 and {}",
                    max
                )));
            }
        }
        Ok(target_id)
    }

    /// N回のプローブを同時実行し、全結果をindex順で返す
    pub async fn run_batch(&self, target_id: &str, num_requests: u32) -> StatusResult<ProbeBatch> {
        let target_id = self.validate(target_id, num_requests)?;

        let runtime = Handle::try_current().map_err(|e| {
            StatusError::Scheduling(format!("no async runtime available: {}", e))
        })?;

        let batch_id = Uuid::new_v4();
        let span = info_span!("probe_batch", %batch_id, target_id, num_requests);

        async move {
            let target: Arc<str> = Arc::from(target_id);

            let handles: Vec<_> = (0..num_requests as usize)
                .map(|index| {
                    let runner = self.runner.clone();
                    let target = Arc::clone(&target);
                    runtime.spawn(
                        async move { runner.run(&target, index).await }.in_current_span(),
                    )
                })
                .collect();

            // join_all は起動順に結果を返す
            let mut outcomes = Vec::with_capacity(handles.len());
            for (index, joined) in join_all(handles).await.into_iter().enumerate() {
                match joined {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => {
                        error!(index, error = %e, "Probe task could not complete");
                        return Err(StatusError::Scheduling(format!(
                            "probe {} could not complete: {}",
                            index, e
                        )));
                    }
                }
            }

            let batch = ProbeBatch::from_outcomes(outcomes);
            info!(
                success = batch.success_count(),
                failure = batch.failure_count(),
                "Probe batch completed"
            );
            Ok(batch)
        }
        .instrument(span)
        .await
    }
}
