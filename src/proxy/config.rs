use serde::{Deserialize, Serialize};

/// Default UptimeRobot v2 endpoint
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.uptimerobot.com/v2/getMonitors";

/// Environment variable holding the UptimeRobot API key
pub const DEFAULT_API_KEY_ENV: &str = "UPTIMEROBOT_API_KEY";

/// 反代服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// 是否允许局域网访问
    /// - false: 仅本机访问 127.0.0.1（默认）
    /// - true: 允许局域网访问 0.0.0.0
    #[serde(default)]
    pub allow_lan_access: bool,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// UptimeRobot getMonitors endpoint
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    /// Name of the environment variable the API key is read from.
    /// The key itself never lives in this struct.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// API 请求超时时间(秒)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Drop a client-supplied `api_key` instead of letting it replace ours
    #[serde(default)]
    pub lock_api_key: bool,

    /// Answer CORS preflights for a front-end served from another origin
    #[serde(default = "default_true")]
    pub allow_cors: bool,

    /// 上游代理配置
    #[serde(default)]
    pub upstream_proxy: UpstreamProxyConfig,
}

/// 上游代理配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpstreamProxyConfig {
    /// 是否启用
    pub enabled: bool,
    /// 代理地址 (http://, https://, socks5://)
    pub url: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            allow_lan_access: false,
            port: default_port(),
            upstream_url: default_upstream_url(),
            api_key_env: default_api_key_env(),
            request_timeout: default_request_timeout(),
            lock_api_key: false,
            allow_cors: true,
            upstream_proxy: UpstreamProxyConfig::default(),
        }
    }
}

fn default_port() -> u16 {
    8787
}

fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_request_timeout() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

impl ProxyConfig {
    /// 获取实际的监听地址
    /// - allow_lan_access = false: 返回 "127.0.0.1"
    /// - allow_lan_access = true: 返回 "0.0.0.0"
    pub fn get_bind_address(&self) -> &str {
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        }
    }
}
