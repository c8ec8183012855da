//! HTTP 路由模块
//!
//! 路由结构：
//! - `POST /message` - 接收信封请求并转发给 FCM

pub mod message;

use axum::Router;

use crate::http::HttpServerState;

/// 创建所有路由
pub fn create_routes() -> Router<HttpServerState> {
    Router::new().merge(message::create_route())
}
