//! 消息发送路由
//!
//! 路由：POST /message

use axum::{
    body::Body,
    extract::{Request, State},
    response::Json,
    routing::post,
    Router,
};
use futures::StreamExt;
use serde_json::Value;
use tracing::{error, info};

use crate::error::{RelayError, Result};
use crate::http::HttpServerState;
use crate::model::{MessageEnvelope, Protocol};
use crate::provider::types::{HttpMessage, XmppMessage};

/// 请求体大小上限：1 MiB，超过直接 413 拒绝
const MAX_BODY_BYTES: usize = 1_048_576;

/// 创建消息路由
pub fn create_route() -> Router<HttpServerState> {
    Router::new().route("/message", post(send_message))
}

/// 消息发送处理器
///
/// 解析信封 → 按协议分发 → 翻译 provider 结果。每个请求最多调用
/// provider 一次，任何失败都只影响本次请求
async fn send_message(
    State(state): State<HttpServerState>,
    request: Request,
) -> Result<Json<Value>> {
    // 超限与读取失败分开处理，都是请求级错误，不影响进程
    let body = read_body(request.into_body()).await?;

    let envelope: MessageEnvelope = serde_json::from_slice(&body).map_err(|e| {
        error!("Envelope parse error: {}", e);
        RelayError::Parse(e.to_string())
    })?;

    // 协议集合是封闭的，不认识的值统一 400
    let protocol = Protocol::from_str(&envelope.protocol).ok_or_else(|| {
        error!("Unsupported protocol: {:?}", envelope.protocol);
        RelayError::UnsupportedProtocol
    })?;

    let response = match protocol {
        Protocol::Http => {
            let message: HttpMessage = serde_json::from_str(envelope.message.get())
                .map_err(|e| {
                    error!("Message parse error: {}", e);
                    RelayError::Parse(e.to_string())
                })?;

            let res = state
                .provider
                .send_http(&state.config.api_key, message)
                .await
                .map_err(|e| {
                    error!("Message send error: {}", e);
                    e
                })?;
            serde_json::to_value(res)
        }
        Protocol::Xmpp => {
            let message: XmppMessage = serde_json::from_str(envelope.message.get())
                .map_err(|e| {
                    error!("Message parse error: {}", e);
                    RelayError::Parse(e.to_string())
                })?;

            // CCS message_id 不向上游透传
            let (res, _message_id) = state
                .provider
                .send_xmpp(&state.config.sender_id, &state.config.api_key, message)
                .await
                .map_err(|e| {
                    error!("Message send error: {}", e);
                    e
                })?;
            serde_json::to_value(res)
        }
    }
    .map_err(|e| RelayError::Internal(e.to_string()))?;

    info!("Response: {}", response);
    Ok(Json(response))
}

/// 读取请求体，按 1 MiB 上限拒绝
///
/// 超限 → 413；传输层读取失败 → 400
async fn read_body(body: Body) -> Result<Vec<u8>> {
    let mut stream = body.into_data_stream();
    let mut buf = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            error!("Body read error: {}", e);
            RelayError::BadRequest(e.to_string())
        })?;
        if buf.len() + chunk.len() > MAX_BODY_BYTES {
            error!("Body exceeds {} bytes, rejecting", MAX_BODY_BYTES);
            return Err(RelayError::PayloadTooLarge);
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf)
}
