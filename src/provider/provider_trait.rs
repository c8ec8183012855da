use async_trait::async_trait;

use crate::error::Result;
use crate::provider::types::{HttpMessage, HttpResponse, XmppMessage, XmppResponse};

/// Push Provider Trait（推送提供者接口）
///
/// 两种投递模式各一个入口，每次调用只尝试一次，不重试
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// HTTP 投递模式发送
    async fn send_http(&self, api_key: &str, message: HttpMessage) -> Result<HttpResponse>;

    /// XMPP（CCS）投递模式发送
    ///
    /// 返回值中的 String 是本次下行的 CCS message_id（调用方未指定时由
    /// Provider 生成），上游不透传
    async fn send_xmpp(
        &self,
        sender_id: &str,
        api_key: &str,
        message: XmppMessage,
    ) -> Result<(XmppResponse, String)>;
}
