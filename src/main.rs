use std::process;
use std::sync::Arc;

use anyhow::Result;
use fcm_relay::{cli::Cli, logging, FcmProvider, RelayConfig, RelayHttpServer};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env 文件（如果存在）
    let _ = dotenvy::dotenv();

    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志（优先级：CLI > 默认值）
    let log_level = cli.get_log_level().unwrap_or_else(|| "info".to_string());
    let log_format = cli.get_log_format();
    logging::init_logging(&log_level, log_format.as_deref(), cli.quiet)?;

    tracing::info!("🚀 FCM Relay starting...");

    // 加载配置（按优先级：命令行 > 环境变量 > 默认值）
    // 必填项缺失或解析失败在这里终止进程，不接受部分配置
    let mut config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ 配置加载失败: {:#}", e);
            tracing::error!("💡 请检查 FCM_API_KEY / FCM_SENDER_ID 等环境变量后重试");
            process::exit(1);
        }
    };
    config.merge_from_cli(&cli);

    // 显示配置信息
    tracing::info!("📊 Relay Configuration:");
    tracing::info!("  - Port: {}", config.port);
    tracing::info!("  - Sender ID: {}", config.sender_id);
    tracing::info!("  - Debug: {}", config.debug);

    // 构建 provider 与服务器
    let provider = Arc::new(FcmProvider::new(config.debug));
    let server = RelayHttpServer::new(Arc::new(config), provider);

    // 运行服务器（绑定失败是致命的）
    if let Err(e) = server.start().await {
        tracing::error!("❌ 服务器运行失败: {}", e);
        process::exit(1);
    }

    Ok(())
}
