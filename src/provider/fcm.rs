use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{RelayError, Result};
use crate::provider::provider_trait::PushProvider;
use crate::provider::types::{HttpMessage, HttpResponse, XmppMessage, XmppResponse};

/// FCM legacy HTTP API 发送端点
const FCM_SEND_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// CCS（XMPP 投递模式）网关端点
const CCS_SEND_ENDPOINT: &str = "https://fcm-xmpp.googleapis.com:5236/fcm/ccs";

/// FCM (Firebase Cloud Messaging) Provider
///
/// HTTP 投递走 legacy send 接口；XMPP 投递把下行 stanza 交给 CCS 网关，
/// 连接由共享 Client 的连接池保持。两条路径都只尝试一次，不设超时。
pub struct FcmProvider {
    client: Client,
    http_endpoint: String,
    ccs_endpoint: String,
    debug: bool,
}

impl FcmProvider {
    /// 创建新的 FCM Provider
    pub fn new(debug: bool) -> Self {
        Self::with_endpoints(FCM_SEND_ENDPOINT, CCS_SEND_ENDPOINT, debug)
    }

    /// 指定端点创建（测试和私有化部署用）
    pub fn with_endpoints(http_endpoint: &str, ccs_endpoint: &str, debug: bool) -> Self {
        Self {
            client: Client::new(),
            http_endpoint: http_endpoint.to_string(),
            ccs_endpoint: ccs_endpoint.to_string(),
            debug,
        }
    }
}

#[async_trait]
impl PushProvider for FcmProvider {
    async fn send_http(&self, api_key: &str, message: HttpMessage) -> Result<HttpResponse> {
        if self.debug {
            info!(
                "[FCM] HTTP payload: {}",
                serde_json::to_string(&message).unwrap_or_default()
            );
        }

        let response = self
            .client
            .post(&self.http_endpoint)
            .header("Authorization", format!("key={}", api_key))
            .header("Content-Type", "application/json")
            .json(&message)
            .send()
            .await
            .map_err(|e| RelayError::Provider(format!("FCM request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let parsed: HttpResponse = response
                .json()
                .await
                .map_err(|e| RelayError::Provider(format!("FCM response decode failed: {}", e)))?;
            Ok(parsed)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            error!("[FCM] HTTP send failed: status={}, error={}", status, error_text);
            Err(RelayError::Provider(format!(
                "FCM send failed: status={}, error={}",
                status, error_text
            )))
        }
    }

    async fn send_xmpp(
        &self,
        sender_id: &str,
        api_key: &str,
        mut message: XmppMessage,
    ) -> Result<(XmppResponse, String)> {
        // CCS 要求每条下行消息带 message_id，调用方未指定时生成一个
        let message_id = match message.message_id.clone() {
            Some(id) if !id.is_empty() => id,
            _ => {
                let id = Uuid::new_v4().to_string();
                message.message_id = Some(id.clone());
                id
            }
        };

        if self.debug {
            info!(
                "[FCM] XMPP stanza: message_id={}, payload={}",
                message_id,
                serde_json::to_string(&message).unwrap_or_default()
            );
        }

        let response = self
            .client
            .post(&self.ccs_endpoint)
            .basic_auth(format!("{}@fcm.googleapis.com", sender_id), Some(api_key))
            .header("Content-Type", "application/json")
            .json(&message)
            .send()
            .await
            .map_err(|e| RelayError::Provider(format!("CCS request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "[FCM] XMPP send failed: message_id={}, status={}, error={}",
                message_id, status, error_text
            );
            return Err(RelayError::Provider(format!(
                "CCS send failed: status={}, error={}",
                status, error_text
            )));
        }

        let ack: XmppResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Provider(format!("CCS response decode failed: {}", e)))?;

        // NACK 按 provider 失败处理
        if ack.message_type.as_deref() == Some("nack") {
            let reason = format!(
                "CCS nack: {}: {}",
                ack.error.as_deref().unwrap_or("unknown"),
                ack.error_description.as_deref().unwrap_or("")
            );
            error!("[FCM] {}", reason);
            return Err(RelayError::Provider(reason));
        }

        Ok((ack, message_id))
    }
}
