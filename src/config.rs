use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    /// Never defaulted: must come from the config file or the environment.
    pub password: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: None,
        }
    }
}

/// Environment variables consulted by [`AppConfig::apply_env`], first match wins.
const USERNAME_VARS: [&str; 2] = ["PHISHCHECK_USERNAME", "ADMIN_USERNAME"];
const PASSWORD_VARS: [&str; 2] = ["PHISHCHECK_PASSWORD", "ADMIN_PASSWORD"];
const HOST_VAR: &str = "PHISHCHECK_HOST";
const PORT_VAR: &str = "PHISHCHECK_PORT";

impl AppConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML config: {}", path))?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))?;
        Ok(())
    }

    /// Load `path` if it exists, otherwise start from defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        if Path::new(path).exists() {
            let config = Self::from_file(path)?;
            log::info!("Loaded configuration from: {}", path);
            Ok(config)
        } else {
            log::warn!("Configuration file '{}' not found, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Override file values from the process environment.
    pub fn apply_env(&mut self) -> anyhow::Result<()> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    pub fn apply_env_from<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| names.iter().find_map(|name| lookup(*name));

        if let Some(username) = first(&USERNAME_VARS) {
            self.auth.username = username;
        }
        if let Some(password) = first(&PASSWORD_VARS) {
            self.auth.password = Some(password);
        }
        if let Some(host) = lookup(HOST_VAR) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", PORT_VAR, port))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.auth.username.trim().is_empty() {
            bail!("auth.username must not be empty");
        }
        match self.auth.password.as_deref() {
            Some(password) if !password.trim().is_empty() => {}
            _ => bail!(
                "No login password configured; set auth.password or {}",
                PASSWORD_VARS[0]
            ),
        }
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
