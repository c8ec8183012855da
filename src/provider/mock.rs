use async_trait::async_trait;
use tracing::info;

use crate::error::{RelayError, Result};
use crate::provider::provider_trait::PushProvider;
use crate::provider::types::{HttpMessage, HttpResponse, HttpResult, XmppMessage, XmppResponse};

/// Mock Provider（用于测试）
///
/// 不调用真实 API；默认返回固定的成功响应，`failing` 构造则对
/// 每次调用返回指定的 provider 错误
#[derive(Default)]
pub struct MockProvider {
    fail_with: Option<String>,
}

impl MockProvider {
    /// 总是成功的 Mock
    pub fn new() -> Self {
        Self { fail_with: None }
    }

    /// 总是失败的 Mock
    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
        }
    }
}

#[async_trait]
impl PushProvider for MockProvider {
    async fn send_http(&self, _api_key: &str, message: HttpMessage) -> Result<HttpResponse> {
        if let Some(reason) = &self.fail_with {
            return Err(RelayError::Provider(reason.clone()));
        }
        info!("[MOCK PUSH] HTTP send: to={:?}", message.to);
        Ok(HttpResponse {
            multicast_id: 216,
            success: 1,
            failure: 0,
            canonical_ids: 0,
            results: vec![HttpResult {
                message_id: Some("1:mock".to_string()),
                registration_id: None,
                error: None,
            }],
        })
    }

    async fn send_xmpp(
        &self,
        _sender_id: &str,
        _api_key: &str,
        message: XmppMessage,
    ) -> Result<(XmppResponse, String)> {
        if let Some(reason) = &self.fail_with {
            return Err(RelayError::Provider(reason.clone()));
        }
        let message_id = message
            .message_id
            .clone()
            .unwrap_or_else(|| "m-mock".to_string());
        info!(
            "[MOCK PUSH] XMPP send: to={:?}, message_id={}",
            message.to, message_id
        );
        Ok((
            XmppResponse {
                from: message.to.clone(),
                message_id: Some(message_id.clone()),
                message_type: Some("ack".to_string()),
                error: None,
                error_description: None,
            },
            message_id,
        ))
    }
}
