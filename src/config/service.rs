// src/config/service.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/scorer.toml";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

pub const ENV_CONFIG_PATH: &str = "SCORER_CONFIG_PATH";
pub const ENV_ADDR: &str = "SCORER_ADDR";

fn default_addr() -> String {
    DEFAULT_ADDR.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

/// Top-level service config. Scorer bounds are fixed in code and are not
/// part of it; an unknown table such as `[scorer]` is a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

impl ServiceConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scorer config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing scorer config at {}", path.display()))
    }

    /// Load using env var + fallbacks:
    /// 1) $SCORER_CONFIG_PATH (must exist)
    /// 2) config/scorer.toml
    /// 3) built-in defaults
    ///
    /// `$SCORER_ADDR` overrides the listen address in every case.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
            if fallback.exists() {
                Self::load_from(&fallback)?
            } else {
                Self::default()
            }
        };

        if let Some(addr) = parse_addr_env(std::env::var(ENV_ADDR).ok()) {
            cfg.server.addr = addr;
        }
        Ok(cfg)
    }
}

// blank values are ignored
fn parse_addr_env(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = ServiceConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ServiceConfig::default());
        assert_eq!(cfg.server.addr, "0.0.0.0:8080");
    }

    #[test]
    fn server_table_sets_addr() {
        let cfg =
            ServiceConfig::from_toml_str("[server]\naddr = \"127.0.0.1:3000\"\n").unwrap();
        assert_eq!(cfg.server.addr, "127.0.0.1:3000");
    }

    #[test]
    fn scorer_table_is_rejected() {
        let err = ServiceConfig::from_toml_str("[scorer]\nthreshold = 100\n").unwrap_err();
        assert!(format!("{err:#}").contains("scorer"), "got: {err:#}");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(ServiceConfig::from_toml_str("[server\naddr = ").is_err());
        assert!(ServiceConfig::from_toml_str("[server]\naddr = 8080").is_err());
        assert!(ServiceConfig::from_toml_str("[server]\nport = 8080").is_err());
    }

    #[test]
    fn addr_env_ignores_blank() {
        assert_eq!(parse_addr_env(None), None);
        assert_eq!(parse_addr_env(Some("  ".into())), None);
        assert_eq!(
            parse_addr_env(Some(" 127.0.0.1:9000 ".into())),
            Some("127.0.0.1:9000".to_string())
        );
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        // Isolate CWD so the repo's config/ does not leak in
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_ADDR);

        let v = ServiceConfig::load_default().unwrap();
        assert_eq!(v, ServiceConfig::default());

        let p = tmp.path().join("custom.toml");
        fs::write(&p, "[server]\naddr = \"127.0.0.1:9090\"\n").unwrap();
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        let v2 = ServiceConfig::load_default().unwrap();
        assert_eq!(v2.server.addr, "127.0.0.1:9090");
        env::remove_var(ENV_CONFIG_PATH);

        env::set_current_dir(&old).unwrap();
    }
}
