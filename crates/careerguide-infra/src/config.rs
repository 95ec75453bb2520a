//! Application configuration loader.
//!
//! Reads a TOML file into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed, so a bare deployment still starts.

use std::path::{Path, PathBuf};

use careerguide_types::config::AppConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CAREERGUIDE_CONFIG";

/// Pick the config file path.
///
/// Priority:
/// 1. `--config` flag
/// 2. `CAREERGUIDE_CONFIG` environment variable
/// 3. `{data_dir}/config.toml`
pub fn resolve_config_path(flag: Option<&Path>, data_dir: &Path) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    data_dir.join("config.toml")
}

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and returns the default.
pub async fn load_app_config(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerguide_types::config::{AuthMode, ProviderKind};
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_app_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_app_config(&tmp.path().join("config.toml")).await;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 3000);
    }

    #[tokio::test]
    async fn load_app_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(
            &path,
            r#"
[server]
port = 8080

[auth]
mode = "trusted_headers"

[[reply.candidates]]
provider = "openai_compatible"
model = "gpt-4o-mini"
api_key_env = "OPENAI_API_KEY"
base_url = "http://localhost:4000/v1"
"#,
        )
        .await
        .unwrap();

        let config = load_app_config(&path).await;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.auth.mode, AuthMode::TrustedHeaders);
        assert_eq!(config.reply.candidates.len(), 1);
        assert_eq!(config.reply.candidates[0].provider, ProviderKind::OpenaiCompatible);
        assert_eq!(config.reply.max_output_tokens, 512);
        // Untouched section keeps its defaults.
        assert_eq!(config.title.candidates.len(), 2);
    }

    #[tokio::test]
    async fn load_app_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_app_config(&path).await;
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn resolve_config_path_prefers_flag() {
        let flag = PathBuf::from("/etc/careerguide.toml");
        assert_eq!(
            resolve_config_path(Some(&flag), Path::new("/data")),
            flag
        );
    }
}
