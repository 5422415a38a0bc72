use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config/backoffice.toml";
const ENV_PREFIX: &str = "BACKOFFICE";

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Directory holding the PHP endpoints.
    pub base_url: String,
    /// Shared secret for encrypted endpoints.
    pub secret_key: String,
    /// Applies to every request; unset means no timeout.
    pub request_timeout_secs: Option<u64>,
    /// Log level for the console crates.
    pub level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1/backoffice/api/".to_string(),
            secret_key: String::new(),
            request_timeout_secs: None,
            level: "info".to_string(),
        }
    }
}

impl std::fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleConfig")
            .field("base_url", &self.base_url)
            .field("secret_key", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("level", &self.level)
            .finish()
    }
}

impl ConsoleConfig {
    /// Reads the optional TOML file, then `BACKOFFICE_*` environment variables.
    pub fn load(path: Option<&str>) -> Result<Self> {
        Self::load_with(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(path: Option<&str>, env: config::Environment) -> Result<Self> {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(env)
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(vars))
    }

    fn write_config(name: &str, body: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("backoffice-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reads_toml_file() {
        let path = write_config(
            "file_only.toml",
            "base_url = \"https://bo.example.com/api\"\nsecret_key = \"k\"\nrequest_timeout_secs = 30\n",
        );

        let config = ConsoleConfig::load_with(path.to_str(), env(&[])).unwrap();
        assert_eq!(config.base_url, "https://bo.example.com/api");
        assert_eq!(config.secret_key, "k");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.level, "info");
    }

    #[test]
    fn environment_overrides_file() {
        let path = write_config(
            "with_env.toml",
            "base_url = \"https://bo.example.com/api\"\nlevel = \"warn\"\n",
        );

        let config = ConsoleConfig::load_with(
            path.to_str(),
            env(&[
                ("BACKOFFICE_BASE_URL", "https://staging.example.com/api"),
                ("BACKOFFICE_SECRET_KEY", "from-env"),
            ]),
        )
        .unwrap();
        assert_eq!(config.base_url, "https://staging.example.com/api");
        assert_eq!(config.secret_key, "from-env");
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn debug_hides_secret() {
        let config = ConsoleConfig {
            secret_key: "top-secret".to_string(),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("top-secret"));
    }
}
