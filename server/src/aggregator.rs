//! Aggregator
//!
//! [`ProbeBatch`] を [`StatusReport`] に集約する純粋関数。
//!
//! - アカウント一覧: index が最も小さい成功プローブのもの
//! - レイテンシ統計: 成功・失敗を問わず全プローブの所要時間
//! - エラー集計: エラーメッセージの完全一致でグルーピング

use stackset_status_common::{
    error::{StatusError, StatusResult},
    types::{ProbeBatch, StatusReport},
};
use std::collections::BTreeMap;

/// バッチをレポートに集約
///
/// 成功したプローブが1つもない場合は `NoSuccessfulProbe` を返す。
pub fn aggregate(batch: &ProbeBatch) -> StatusResult<StatusReport> {
    let accounts = batch
        .outcomes()
        .iter()
        .find_map(|outcome| outcome.accounts())
        .cloned()
        .ok_or(StatusError::NoSuccessfulProbe {
            attempts: batch.len(),
        })?;

    let mut durations: Vec<f64> = batch.outcomes().iter().map(|o| o.duration_ms).collect();
    durations.sort_by(|a, b| a.total_cmp(b));

    let mut errors: BTreeMap<String, u64> = BTreeMap::new();
    for message in batch.outcomes().iter().filter_map(|o| o.error_message()) {
        *errors.entry(message.to_string()).or_insert(0) += 1;
    }

    let total: f64 = durations.iter().sum();

    Ok(StatusReport {
        accounts,
        avg: total / durations.len() as f64,
        median: percentile(&durations, 0.50),
        min: durations[0],
        max: durations[durations.len() - 1],
        p25: percentile(&durations, 0.25),
        p75: percentile(&durations, 0.75),
        total,
        errors,
    })
}

/// ソート済みの値から線形補間でパーセンタイルを求める（rank = p × (n − 1)）
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
