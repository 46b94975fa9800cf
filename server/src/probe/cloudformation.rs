//! CloudFormation ProbeClient
//!
//! `ListStackInstances` でスタックセットのインスタンス一覧を取得し、
//! アカウントIDを抽出する。

use super::ProbeClient;
use async_trait::async_trait;
use aws_config::{retry::RetryConfig, BehaviorVersion, Region};
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::Client;
use stackset_status_common::{config::AwsSettings, error::ProbeError};
use tracing::info;

/// 認証情報の問題を示すサービスエラーコード
const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "ExpiredToken",
    "ExpiredTokenException",
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
    "UnrecognizedClientException",
];

/// CloudFormation の `ListStackInstances` を呼び出すクライアント
#[derive(Clone, Debug)]
pub struct CloudFormationProbeClient {
    client: Client,
}

impl CloudFormationProbeClient {
    /// SDKクライアントから作成
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// 設定からクライアントを作成
    ///
    /// 認証情報はSDKのデフォルトチェーンから解決する。
    /// プローブは1回きりの試行なのでSDKのリトライは無効化する。
    pub async fn from_settings(aws: &AwsSettings) -> Self {
        let endpoint_url = aws.resolved_endpoint_url();
        info!(
            region = %aws.aws_region,
            endpoint_url = %endpoint_url,
            "Initializing CloudFormation client"
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(aws.aws_region.trim().to_string()))
            .endpoint_url(endpoint_url)
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl ProbeClient for CloudFormationProbeClient {
    async fn list_accounts(&self, target_id: &str) -> Result<Vec<String>, ProbeError> {
        let mut accounts = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_stack_instances()
                .stack_set_name(target_id)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(classify_sdk_error)?;

            accounts.extend(
                output
                    .summaries()
                    .iter()
                    .filter_map(|summary| summary.account())
                    .filter(|account| !account.is_empty())
                    .map(str::to_string),
            );

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(accounts)
    }
}

/// SDKエラーを ProbeError に分類
fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> ProbeError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) | SdkError::ResponseError(_) => {
            ProbeError::Connectivity(DisplayErrorContext(&err).to_string())
        }
        SdkError::ConstructionFailure(_) => {
            let message = DisplayErrorContext(&err).to_string();
            let lowered = message.to_ascii_lowercase();
            if lowered.contains("credential") || lowered.contains("identity") {
                ProbeError::Auth(message)
            } else {
                ProbeError::Remote(message)
            }
        }
        SdkError::ServiceError(_) => {
            let code = err.code().unwrap_or("Unknown");
            let message = err.message().unwrap_or("no error message").to_string();
            if AUTH_ERROR_CODES.contains(&code) {
                ProbeError::Auth(message)
            } else {
                ProbeError::Remote(format!("{}: {}", code, message))
            }
        }
        _ => ProbeError::Remote(DisplayErrorContext(&err).to_string()),
    }
}
