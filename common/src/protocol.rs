//! 通信プロトコル定義
//!
//! HTTPクエリ・レスポンスボディ

use serde::{Deserialize, Serialize};

/// `num_requests` 省略時のプローブ回数
pub const DEFAULT_NUM_REQUESTS: u32 = 1;

/// GET /status のクエリパラメータ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusQuery {
    /// 対象スタックセットID
    #[serde(default)]
    pub stack_set_id: Option<String>,
    /// プローブ回数
    #[serde(default)]
    pub num_requests: Option<u32>,
}

impl StatusQuery {
    /// 前後の空白を除いたスタックセットID（空なら None）
    pub fn target_id(&self) -> Option<&str> {
        self.stack_set_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// プローブ回数（省略時はデフォルト）
    pub fn num_requests(&self) -> u32 {
        self.num_requests.unwrap_or(DEFAULT_NUM_REQUESTS)
    }
}

/// GET /ping のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    /// 常に "pong"
    pub ping: String,
}

impl Default for PingResponse {
    fn default() -> Self {
        Self {
            ping: "pong".to_string(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// エラーメッセージ
    pub error: String,
}
