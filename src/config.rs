// src/config.rs
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result, bail};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Prefix the chat route is nested under, e.g. `/api/chat`.
    pub mount_path: Option<String>,
    pub body_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            mount_path: None,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("ECHOBOT_HOST") {
            config.host = host
                .parse()
                .with_context(|| format!("ECHOBOT_HOST is not an IP address: {host}"))?;
        }

        if let Some(port) = lookup("ECHOBOT_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("ECHOBOT_PORT is not a valid port: {port}"))?;
        }

        if let Some(path) = lookup("ECHOBOT_MOUNT_PATH") {
            config.mount_path = normalize_mount_path(&path)?;
        }

        if let Some(limit) = lookup("ECHOBOT_BODY_LIMIT") {
            config.body_limit = limit
                .parse()
                .with_context(|| format!("ECHOBOT_BODY_LIMIT is not a byte count: {limit}"))?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn normalize_mount_path(path: &str) -> Result<Option<String>> {
    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }
    if !path.starts_with('/') {
        bail!("ECHOBOT_MOUNT_PATH must start with '/': {path}");
    }

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            ("ECHOBOT_HOST", "127.0.0.1"),
            ("ECHOBOT_PORT", "8080"),
            ("ECHOBOT_MOUNT_PATH", "/api/chat/"),
            ("ECHOBOT_BODY_LIMIT", "512"),
        ]))
        .unwrap();

        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.mount_path.as_deref(), Some("/api/chat"));
        assert_eq!(config.body_limit, 512);
    }

    #[test]
    fn root_mount_path_means_no_prefix() {
        let config = Config::from_lookup(lookup(&[("ECHOBOT_MOUNT_PATH", "/")])).unwrap();
        assert_eq!(config.mount_path, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("ECHOBOT_PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup(&[("ECHOBOT_HOST", "localhost")])).is_err());
        assert!(Config::from_lookup(lookup(&[("ECHOBOT_MOUNT_PATH", "api/chat")])).is_err());
        assert!(Config::from_lookup(lookup(&[("ECHOBOT_BODY_LIMIT", "-1")])).is_err());
    }
}
