//! 共通型定義
//!
//! ProbeOutcome, ProbeBatch, StatusReport等のコアデータ型

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 1回のプローブの結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeResult {
    /// 成功（重複排除済みのアカウントID集合）
    Success {
        /// アカウントID
        accounts: BTreeSet<String>,
    },
    /// 失敗（エラーメッセージ）
    Failure {
        /// エラーメッセージ
        error_message: String,
    },
}

/// プローブ結果（バッチ内の位置と所要時間付き）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// バッチ内の順序 (0..N-1)
    pub index: usize,
    /// 所要時間（ミリ秒）
    pub duration_ms: f64,
    /// 成功/失敗
    pub result: ProbeResult,
}

impl ProbeOutcome {
    /// 成功結果を作成（アカウントIDは重複排除される）
    pub fn success<I, S>(index: usize, duration_ms: f64, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index,
            duration_ms,
            result: ProbeResult::Success {
                accounts: accounts.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// 失敗結果を作成
    pub fn failure(index: usize, duration_ms: f64, error_message: impl Into<String>) -> Self {
        Self {
            index,
            duration_ms,
            result: ProbeResult::Failure {
                error_message: error_message.into(),
            },
        }
    }

    /// 成功したか
    pub fn is_success(&self) -> bool {
        matches!(self.result, ProbeResult::Success { .. })
    }

    /// 成功時のアカウントID集合
    pub fn accounts(&self) -> Option<&BTreeSet<String>> {
        match &self.result {
            ProbeResult::Success { accounts } => Some(accounts),
            ProbeResult::Failure { .. } => None,
        }
    }

    /// 失敗時のエラーメッセージ
    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            ProbeResult::Success { .. } => None,
            ProbeResult::Failure { error_message } => Some(error_message),
        }
    }
}

/// 1リクエスト分のプローブ結果一覧（index順）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeBatch {
    outcomes: Vec<ProbeOutcome>,
}

impl ProbeBatch {
    /// 結果一覧からバッチを作成
    ///
    /// 完了順に関係なく index 順に並べ替える。
    pub fn from_outcomes(mut outcomes: Vec<ProbeOutcome>) -> Self {
        outcomes.sort_by_key(|outcome| outcome.index);
        Self { outcomes }
    }

    /// index順の結果一覧
    pub fn outcomes(&self) -> &[ProbeOutcome] {
        &self.outcomes
    }

    /// プローブ数
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// 空か
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// 成功数
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// 失敗数
    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }
}

/// ステータスレポート（GET /status のレスポンスボディ）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    /// 最初に成功したプローブのアカウントID
    pub accounts: BTreeSet<String>,
    /// 平均レイテンシ（ms）
    pub avg: f64,
    /// 中央値（ms）
    pub median: f64,
    /// 最小値（ms）
    pub min: f64,
    /// 最大値（ms）
    pub max: f64,
    /// 25パーセンタイル（ms）
    #[serde(rename = "percentile_25")]
    pub p25: f64,
    /// 75パーセンタイル（ms）
    #[serde(rename = "percentile_75")]
    pub p75: f64,
    /// 合計（ms）
    pub total: f64,
    /// エラーメッセージごとの発生回数
    pub errors: BTreeMap<String, u64>,
}
