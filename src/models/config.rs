//! Configuration loaded from nacplan.toml
//!
//! Lookup order: `<cwd>/nacplan.toml`, then the user config directory
//! (`~/.config/nacplan/config.toml`), then built-in defaults. Unknown or
//! missing fields fall back to their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NacplanConfig {
    /// Workspace directory, relative to the current directory
    pub workspace: String,
    pub ai: AiConfig,
    pub export: ExportConfig,
}

impl Default for NacplanConfig {
    fn default() -> Self {
        Self {
            workspace: "nacplan".to_string(),
            ai: AiConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// AI content-generation collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// HTTP endpoint for text generation; empty means unconfigured
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Outbound call timeout; there is no automatic retry
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            model: "default".to_string(),
            api_key_env: "NACPLAN_AI_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory for exported plan documents, relative to the workspace
    pub dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: "exports".to_string(),
        }
    }
}

impl NacplanConfig {
    /// Load configuration for a working directory
    pub fn load(cwd: &Path) -> Result<Self> {
        let local = cwd.join("nacplan.toml");
        if local.exists() {
            return Self::parse_file(&local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join("nacplan/config.toml");
            if user.exists() {
                return Self::parse_file(&user);
            }
        }

        Ok(Self::default())
    }

    fn parse_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Absolute workspace directory for a working directory
    pub fn workspace_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.workspace)
    }

    /// Absolute export directory
    pub fn export_dir(&self, cwd: &Path) -> PathBuf {
        self.workspace_dir(cwd).join(&self.export.dir)
    }

    /// Starter config written by `nacplan init`
    pub fn starter_toml() -> &'static str {
        r#"# nacplan configuration

workspace = "nacplan"

[ai]
# HTTP endpoint for AI content generation; leave empty to disable
endpoint = ""
model = "default"
api_key_env = "NACPLAN_AI_KEY"
timeout_secs = 60

[export]
dir = "exports"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let temp = TempDir::new().unwrap();
        let config = NacplanConfig::load(temp.path()).unwrap();

        assert_eq!(config.workspace, "nacplan");
        assert_eq!(config.ai.timeout_secs, 60);
        assert!(config.ai.endpoint.is_empty());
    }

    #[test]
    fn test_partial_local_config_overrides() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("nacplan.toml"),
            "[ai]\nendpoint = \"http://localhost:9999/generate\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = NacplanConfig::load(temp.path()).unwrap();
        assert_eq!(config.ai.endpoint, "http://localhost:9999/generate");
        assert_eq!(config.ai.timeout_secs, 5);
        // Untouched sections keep defaults
        assert_eq!(config.export.dir, "exports");
    }

    #[test]
    fn test_starter_toml_parses() {
        let config: NacplanConfig = toml::from_str(NacplanConfig::starter_toml()).unwrap();
        assert_eq!(config.workspace, "nacplan");
    }

    #[test]
    fn test_workspace_and_export_dirs() {
        let config = NacplanConfig::default();
        let cwd = Path::new("/tmp/site");

        assert_eq!(config.workspace_dir(cwd), PathBuf::from("/tmp/site/nacplan"));
        assert_eq!(config.export_dir(cwd), PathBuf::from("/tmp/site/nacplan/exports"));
    }
}
