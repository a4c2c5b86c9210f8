use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::modules::env::ReadEnv;
use crate::proxy::ProxyConfig;

const DATA_DIR: &str = ".uptime_status_proxy";
const CONFIG_FILE: &str = "proxy_config.json";

/// Get data directory path, `UPTIME_PROXY_DATA_DIR` wins over `~/.uptime_status_proxy`
pub fn get_data_dir<E: ReadEnv>(env: &E) -> AppResult<PathBuf> {
    let data_dir = match env.var("UPTIME_PROXY_DATA_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .ok_or_else(|| AppError::Config("Failed to get user home directory".to_string()))?
            .join(DATA_DIR),
    };

    // Ensure directory exists
    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }

    Ok(data_dir)
}

/// Load proxy config: file in the data dir (if any), then environment overrides
pub fn load_app_config<E: ReadEnv>(env: &E) -> AppResult<ProxyConfig> {
    let data_dir = get_data_dir(env)?;
    let config = load_config_file(&data_dir.join(CONFIG_FILE))?;
    Ok(apply_env_overrides(config, env))
}

/// Missing file means defaults
pub fn load_config_file(path: &Path) -> AppResult<ProxyConfig> {
    if !path.exists() {
        return Ok(ProxyConfig::default());
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        AppError::Config(format!(
            "Failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Unparseable values are ignored and the file/default value is kept.
pub fn apply_env_overrides<E: ReadEnv>(mut config: ProxyConfig, env: &E) -> ProxyConfig {
    if let Some(port) = env.var("UPTIME_PROXY_PORT").ok().and_then(|v| v.parse().ok()) {
        config.port = port;
    }
    if let Some(allow) = parse_bool(env, "UPTIME_PROXY_ALLOW_LAN") {
        config.allow_lan_access = allow;
    }
    if let Ok(url) = env.var("UPTIMEROBOT_API_URL") {
        if !url.is_empty() {
            config.upstream_url = url;
        }
    }
    if let Some(secs) = env
        .var("UPTIME_PROXY_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config.request_timeout = secs;
    }
    if let Some(lock) = parse_bool(env, "UPTIME_PROXY_LOCK_API_KEY") {
        config.lock_api_key = lock;
    }
    if let Some(cors) = parse_bool(env, "UPTIME_PROXY_ALLOW_CORS") {
        config.allow_cors = cors;
    }
    if let Ok(proxy_url) = env.var("UPTIME_PROXY_UPSTREAM_PROXY") {
        if !proxy_url.is_empty() {
            config.upstream_proxy.enabled = true;
            config.upstream_proxy.url = proxy_url;
        }
    }
    config
}

fn parse_bool<E: ReadEnv>(env: &E, key: &str) -> Option<bool> {
    match env.var(key).ok()?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::env::InMemoryEnv;
    use crate::proxy::config::DEFAULT_UPSTREAM_URL;

    #[test]
    fn defaults_when_no_file_and_no_env() {
        let dir = tempfile::tempdir().unwrap();
        let env = InMemoryEnv::new();
        env.set("UPTIME_PROXY_DATA_DIR", dir.path().to_string_lossy());

        let config = load_app_config(&env).unwrap();
        assert_eq!(config.port, 8787);
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
        assert!(!config.lock_api_key);
    }

    #[test]
    fn file_values_then_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"port": 9000, "lock_api_key": true, "request_timeout": 30}"#,
        )
        .unwrap();

        let env = InMemoryEnv::new();
        env.set("UPTIME_PROXY_DATA_DIR", dir.path().to_string_lossy());
        env.set("UPTIME_PROXY_PORT", "9100");
        env.set("UPTIMEROBOT_API_URL", "http://127.0.0.1:1/v2/getMonitors");
        env.set("UPTIME_PROXY_UPSTREAM_PROXY", "socks5://127.0.0.1:1080");

        let config = load_app_config(&env).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.request_timeout, 30);
        assert!(config.lock_api_key);
        assert_eq!(config.upstream_url, "http://127.0.0.1:1/v2/getMonitors");
        assert!(config.upstream_proxy.enabled);
        assert_eq!(config.upstream_proxy.url, "socks5://127.0.0.1:1080");
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let env = InMemoryEnv::new();
        env.set("UPTIME_PROXY_PORT", "not-a-port");
        env.set("UPTIME_PROXY_ALLOW_CORS", "maybe");
        env.set("UPTIME_PROXY_LOCK_API_KEY", "yes");

        let config = apply_env_overrides(ProxyConfig::default(), &env);
        assert_eq!(config.port, 8787);
        assert!(config.allow_cors);
        assert!(config.lock_api_key);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
