use clap::Parser;

// 确保 Parser trait 被使用
impl Cli {
    /// 解析命令行参数
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

/// FCM Relay - 推送消息 HTTP 中继
#[derive(Parser, Debug)]
#[command(name = "fcm-relay")]
#[command(version)]
#[command(about = "HTTP relay forwarding push messages to FCM over HTTP or XMPP", long_about = None)]
pub struct Cli {
    /// 监听端口（覆盖 SERVER_PORT）
    #[arg(long, value_name = "PORT", help = "服务监听端口")]
    pub port: Option<u16>,

    /// 日志级别
    #[arg(
        long,
        value_name = "LEVEL",
        help = "日志级别: trace, debug, info, warn, error"
    )]
    pub log_level: Option<String>,

    /// 日志格式
    #[arg(long, value_name = "FORMAT", help = "日志格式: pretty, json, compact")]
    pub log_format: Option<String>,

    /// 静默模式（只输出错误日志）
    #[arg(long, help = "静默模式，只输出错误日志")]
    pub quiet: bool,
}

impl Cli {
    /// 获取日志级别
    pub fn get_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }

    /// 获取日志格式
    pub fn get_log_format(&self) -> Option<String> {
        self.log_format.clone()
    }
}
