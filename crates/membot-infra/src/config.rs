//! Configuration loader for membot.
//!
//! Reads `config.toml` from the data directory (`~/.membot/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed, so the chat loop always starts.

use std::path::{Path, PathBuf};

use membot_types::config::AppConfig;

/// Resolve the default data directory, `~/.membot`.
///
/// Falls back to a relative `.membot` when the home directory cannot be
/// determined.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".membot"))
        .unwrap_or_else(|| PathBuf::from(".membot"))
}

/// Load application configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_app_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.memory.buffer_capacity, 20);
        assert_eq!(config.chat.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn load_app_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[memory]
buffer_capacity = 6
retrieval_top_k = 3

[chat]
model = "gpt-4o"
max_tokens = 1024
"#,
        )
        .await
        .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.memory.buffer_capacity, 6);
        assert_eq!(config.memory.retrieval_top_k, 3);
        assert_eq!(config.chat.model, "gpt-4o");
        assert_eq!(config.chat.max_tokens, 1024);
        // Unset fields keep their defaults
        assert_eq!(config.memory.embedding_dimension, 384);
    }

    #[tokio::test]
    async fn load_app_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.memory.buffer_capacity, 20);
        assert_eq!(config.chat.max_tokens, 500);
    }

    #[test]
    fn default_data_dir_ends_with_membot() {
        assert!(default_data_dir().ends_with(".membot"));
    }
}
