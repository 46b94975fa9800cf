//! Integration Test: CloudFormationProbeClient
//!
//! AWS Query プロトコルを話すモックサーバーに対して ListStackInstances を呼び出す。

use aws_sdk_cloudformation::config::{
    retry::RetryConfig, BehaviorVersion, Credentials, Region,
};
use stackset_status::probe::{CloudFormationProbeClient, ProbeClient};
use stackset_status_common::error::ProbeError;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(endpoint_url: &str) -> CloudFormationProbeClient {
    let config = aws_sdk_cloudformation::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .endpoint_url(endpoint_url)
        .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
        .retry_config(RetryConfig::disabled())
        .build();
    CloudFormationProbeClient::new(aws_sdk_cloudformation::Client::from_conf(config))
}

fn list_response(accounts: &[&str], next_token: Option<&str>) -> String {
    let members: String = accounts
        .iter()
        .map(|account| {
            format!(
                "<member><StackSetId>demo:1</StackSetId><Region>us-east-1</Region>\
                 <Account>{}</Account><Status>CURRENT</Status></member>",
                account
            )
        })
        .collect();
    let next_token = next_token
        .map(|token| format!("<NextToken>{}</NextToken>", token))
        .unwrap_or_default();
    format!(
        r#"<ListStackInstancesResponse xmlns="http://cloudformation.amazonaws.com/doc/2010-05-15/">
  <ListStackInstancesResult>
    <Summaries>{}</Summaries>{}
  </ListStackInstancesResult>
  <ResponseMetadata>
    <RequestId>b9b4b068-3a41-11e5-94eb-example</RequestId>
  </ResponseMetadata>
</ListStackInstancesResponse>"#,
        members, next_token
    )
}

fn error_response(code: &str, message: &str) -> String {
    format!(
        r#"<ErrorResponse xmlns="http://cloudformation.amazonaws.com/doc/2010-05-15/">
  <Error>
    <Type>Sender</Type>
    <Code>{}</Code>
    <Message>{}</Message>
  </Error>
  <RequestId>c1d2e3f4-example</RequestId>
</ErrorResponse>"#,
        code, message
    )
}

fn xml(status: u16, body: String) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body, "text/xml")
}

#[tokio::test]
async fn test_list_accounts_extracts_accounts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("Action=ListStackInstances"))
        .and(body_string_contains("StackSetName=demo"))
        .respond_with(xml(
            200,
            list_response(&["111111111111", "222222222222", "111111111111"], None),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let accounts = client_for(&server.uri()).list_accounts("demo").await.unwrap();

    assert_eq!(
        accounts,
        vec!["111111111111", "222222222222", "111111111111"]
    );
}

#[tokio::test]
async fn test_list_accounts_follows_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("NextToken=page-2"))
        .respond_with(xml(200, list_response(&["333333333333"], None)))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("Action=ListStackInstances"))
        .respond_with(xml(200, list_response(&["111111111111"], Some("page-2"))))
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    let accounts = client_for(&server.uri()).list_accounts("demo").await.unwrap();

    assert_eq!(accounts, vec!["111111111111", "333333333333"]);
}

#[tokio::test]
async fn test_service_error_is_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(xml(
            400,
            error_response("StackSetNotFoundException", "StackSet missing not found"),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .list_accounts("missing")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ProbeError::Remote("StackSetNotFoundException: StackSet missing not found".to_string())
    );
}

#[tokio::test]
async fn test_rejected_credentials_are_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(xml(
            403,
            error_response("ExpiredToken", "The security token included in the request is expired"),
        ))
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .list_accounts("demo")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ProbeError::Auth("The security token included in the request is expired".to_string())
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_connectivity_error() {
    // 予約ポート 1 には何も待ち受けていない
    let err = client_for("http://127.0.0.1:1")
        .list_accounts("demo")
        .await
        .unwrap_err();

    assert!(matches!(err, ProbeError::Connectivity(_)), "{:?}", err);
}
