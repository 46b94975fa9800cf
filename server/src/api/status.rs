//! ステータスAPIハンドラー

use super::error::AppError;
use crate::{aggregator, AppState};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use stackset_status_common::{
    error::StatusError,
    protocol::{PingResponse, StatusQuery},
    types::StatusReport,
};

/// GET /status - スタックセットのアカウント一覧とレイテンシ統計
///
/// `num_requests` 回のプローブを同時実行し、集約したレポートを返す。
/// `stack_set_id` が無い場合はプローブを実行せずに400を返す。
pub async fn get_status(
    State(state): State<AppState>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<StatusReport>, AppError> {
    let Query(query) =
        query.map_err(|rejection| StatusError::InvalidRequest(rejection.body_text()))?;

    let target_id = query.target_id().ok_or_else(|| {
        StatusError::InvalidRequest("The 'stack_set_id' query parameter is required.".to_string())
    })?;

    let batch = state
        .scheduler
        .run_batch(target_id, query.num_requests())
        .await?;
    let report = aggregator::aggregate(&batch)?;

    Ok(Json(report))
}

/// GET /ping - 死活確認
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse::default())
}
