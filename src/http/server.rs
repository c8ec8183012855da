//! HTTP 服务器 - 使用 Axum 承载中继路由

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::RelayConfig;
use crate::http::routes;
use crate::provider::PushProvider;

/// HTTP 服务器共享状态
#[derive(Clone)]
pub struct HttpServerState {
    pub config: Arc<RelayConfig>,
    pub provider: Arc<dyn PushProvider>,
}

/// 中继 HTTP 服务器
pub struct RelayHttpServer {
    state: HttpServerState,
}

impl RelayHttpServer {
    /// 创建新的中继服务器
    pub fn new(config: Arc<RelayConfig>, provider: Arc<dyn PushProvider>) -> Self {
        Self {
            state: HttpServerState { config, provider },
        }
    }

    /// 构建路由（集成测试直接驱动这里返回的 Router）
    pub fn router(&self) -> Router {
        // very_permissive：回显任意来源并允许携带凭据，对应上游
        // 无来源白名单 + AllowCredentials 的行为
        Router::new()
            .merge(routes::create_routes())
            .layer(CorsLayer::very_permissive())
            .with_state(self.state.clone())
    }

    /// 启动 HTTP 服务器；绑定失败向上传播，由 main 记录后退出
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = self.router();

        let addr = format!("0.0.0.0:{}", self.state.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("🌐 中继服务器启动在端口 {}", self.state.config.port);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
