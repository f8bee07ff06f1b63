//! Global configuration loader for VisionChat.
//!
//! Reads `config.toml` and deserializes it into [`GlobalConfig`]. Falls back
//! to defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use visionchat_types::config::GlobalConfig;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "VISIONCHAT_CONFIG";

/// Default config location: `<platform config dir>/visionchat/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("visionchat")
        .join("config.toml")
}

/// Load global configuration from `path`.
///
/// - Missing file: [`GlobalConfig::default()`], logged at debug.
/// - Unreadable or unparseable file: a warning and the default.
pub async fn load_global_config(path: &Path) -> GlobalConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", path.display());
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            GlobalConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(&tmp.path().join("config.toml")).await;
        assert_eq!(config.server.port, 9002);
        assert_eq!(config.model.model, "gemini-1.5-pro-latest");
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
[model]
model = "gemini-2.0-flash"
api_key_env = "MY_GEMINI_KEY"

[server]
port = 3000
max_upload_bytes = 1048576
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(&config_path).await;
        assert_eq!(config.model.model, "gemini-2.0-flash");
        assert_eq!(config.model.api_key_env, "MY_GEMINI_KEY");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.max_upload_bytes, 1_048_576);
        assert_eq!(config.server.infer_video_mime, "video/mp4");
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(&config_path).await;
        assert_eq!(config.server.port, 9002);
    }

    #[test]
    fn default_config_path_ends_with_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("visionchat/config.toml"));
    }
}
