use std::env;

use anyhow::{bail, Context, Result};

/// 默认监听端口
const DEFAULT_PORT: u16 = 5000;

/// 中继服务配置
///
/// 启动时加载一次，进程生命周期内不可变，显式传入 HTTP 状态，
/// 不使用进程级可变全局量
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// 监听端口（SERVER_PORT，默认 5000）
    pub port: u16,
    /// FCM API key（FCM_API_KEY，必填）
    pub api_key: String,
    /// FCM sender ID（FCM_SENDER_ID，必填）
    pub sender_id: String,
    /// 调试模式：打开 provider 的 payload 级日志（DEBUG_MODE，默认 false）
    pub debug: bool,
}

impl RelayConfig {
    /// 从进程环境变量加载配置
    ///
    /// 必填项缺失或任何字段解析失败都返回错误，由 main 记录后以
    /// 非零退出码终止，不接受部分配置
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意查找函数加载（测试用，避免修改进程环境）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid SERVER_PORT: {}", raw))?,
            None => DEFAULT_PORT,
        };

        let api_key = match lookup("FCM_API_KEY") {
            Some(key) if !key.is_empty() => key,
            _ => bail!("FCM_API_KEY is required"),
        };

        let sender_id = match lookup("FCM_SENDER_ID") {
            Some(id) if !id.is_empty() => id,
            _ => bail!("FCM_SENDER_ID is required"),
        };

        let debug = match lookup("DEBUG_MODE") {
            Some(raw) => parse_bool(&raw).with_context(|| format!("invalid DEBUG_MODE: {}", raw))?,
            None => false,
        };

        Ok(Self {
            port,
            api_key,
            sender_id,
            debug,
        })
    }

    /// 从命令行参数合并配置（最高优先级）
    pub fn merge_from_cli(&mut self, cli: &crate::cli::Cli) {
        if let Some(port) = cli.port {
            self.port = port;
        }
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        _ => bail!("expected a boolean"),
    }
}
