//! 設定管理
//!
//! `setup.conf`（INI形式）と環境変数から [`Settings`] を読み込む。
//! 読み込みは起動時に一度だけ行い、必須キーの欠落は起動エラーとする。

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::CommonError;

/// デフォルトの設定ファイルパス
pub const DEFAULT_CONFIG_PATH: &str = "setup.conf";

/// 環境変数のプレフィックス（例: `STACKSET_STATUS__AWS__AWS_REGION`）
pub const ENV_PREFIX: &str = "STACKSET_STATUS";

/// アプリケーション設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// AWS設定（必須）
    pub aws: AwsSettings,

    /// HTTPサーバー設定
    #[serde(default)]
    pub server: ServerSettings,

    /// プローブ設定
    #[serde(default)]
    pub probe: ProbeSettings,
}

impl Settings {
    /// 必須キーと値の範囲を検証
    pub fn validate(&self) -> Result<(), CommonError> {
        if self.aws.aws_region.trim().is_empty() {
            return Err(CommonError::Config(
                "Invalid AWS configuration: aws_region is empty".to_string(),
            ));
        }
        if self.probe.max_num_requests == 0 {
            return Err(CommonError::Config(
                "probe.max_num_requests must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// AWS設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsSettings {
    /// リージョン (例: "us-east-1")
    pub aws_region: String,

    /// CloudFormationエンドポイントURL（未指定時はリージョンから導出）
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl AwsSettings {
    /// 実際に使用するCloudFormationエンドポイントURL
    pub fn resolved_endpoint_url(&self) -> String {
        match self.endpoint_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!(
                "https://cloudformation.{}.amazonaws.com",
                self.aws_region.trim()
            ),
        }
    }
}

/// HTTPサーバー設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8000)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl ServerSettings {
    /// バインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// プローブ設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// 1回のプローブのタイムアウト（ミリ秒）(デフォルト: 30000, 0で無効)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// 1リクエストあたりの最大プローブ回数 (デフォルト: 100)
    #[serde(default = "default_max_num_requests")]
    pub max_num_requests: u32,
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_num_requests() -> u32 {
    100
}

impl ProbeSettings {
    /// タイムアウト（無効なら None）
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_num_requests: default_max_num_requests(),
        }
    }
}

/// 設定ファイルと環境変数から設定を読み込む
///
/// 設定ファイルが存在しない場合、必須キーが欠落している場合はエラーを返す。
pub fn load_settings(path: &Path) -> Result<Settings, CommonError> {
    if !path.exists() {
        return Err(CommonError::Config(format!(
            "The configuration file '{}' does not exist.",
            path.display()
        )));
    }

    let settings = Config::builder()
        .add_source(File::from(path).format(FileFormat::Ini))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize::<Settings>()?;

    settings.validate()?;
    Ok(settings)
}
