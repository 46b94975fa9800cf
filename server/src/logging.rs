//! ロギング初期化
//!
//! プロセス起動時に一度だけ呼び出す。
//!
//! - `RUST_LOG` があればそれを優先し、なければ `STACKSET_STATUS_LOG_LEVEL`（デフォルト: info）
//! - `STACKSET_STATUS_LOG_FORMAT=json` で JSON 出力
//! - `STACKSET_STATUS_LOG_DIR` を指定すると日次ローテーションのファイルにも出力

use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// ログレベルの環境変数
pub const LOG_LEVEL_ENV: &str = "STACKSET_STATUS_LOG_LEVEL";
/// ログ形式の環境変数
pub const LOG_FORMAT_ENV: &str = "STACKSET_STATUS_LOG_FORMAT";
/// ログ出力ディレクトリの環境変数
pub const LOG_DIR_ENV: &str = "STACKSET_STATUS_LOG_DIR";

const LOG_FILE_PREFIX: &str = "stackset-status.log";

/// ロギング初期化エラー
#[derive(Debug, Error)]
pub enum LoggingError {
    /// ログディレクトリを作成できない
    #[error("failed to create log directory {path}: {source}")]
    LogDir {
        /// ディレクトリ
        path: PathBuf,
        /// 原因
        source: std::io::Error,
    },

    /// グローバルsubscriberが既に設定済み
    #[error("failed to init logging: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// ログ設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// ログレベル（フィルタ式）
    pub level: Option<String>,
    /// JSON出力
    pub json: bool,
    /// ファイル出力先
    pub dir: Option<PathBuf>,
}

impl LogOptions {
    /// 環境変数から読み込み、CLIのレベル指定で上書き
    pub fn from_env(level_override: Option<&str>) -> Self {
        let level = level_override
            .map(str::to_string)
            .or_else(|| std::env::var(LOG_LEVEL_ENV).ok());
        let json = std::env::var(LOG_FORMAT_ENV)
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let dir = std::env::var(LOG_DIR_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Self { level, json, dir }
    }

    fn filter(&self) -> EnvFilter {
        match &self.level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        }
    }
}

/// ロギングを初期化
///
/// ファイル出力を有効にした場合、返却された guard をプロセス終了まで保持すること。
pub fn init(options: &LogOptions) -> Result<Option<WorkerGuard>, LoggingError> {
    let stdout_layer = if options.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(true).boxed()
    };

    let (file_layer, guard) = match &options.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::LogDir {
                path: dir.clone(),
                source,
            })?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(options.filter())
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
