use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::DEFAULT_REGION;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Knowledge base identifier (BEDROCK_KB_ID)
    #[serde(default)]
    pub kb_id: String,

    /// Generation model ARN (MODEL_ARN)
    #[serde(default)]
    pub model_arn: String,

    /// AWS region the agent-runtime endpoint is derived from
    #[serde(default)]
    pub region: String,

    /// Explicit endpoint override; wins over the region-derived endpoint
    #[serde(default)]
    pub endpoint: Option<String>,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kb_id: String::new(),
            model_arn: String::new(),
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// True when both required identifiers are present
    pub fn has_required_ids(&self) -> bool {
        !self.kb_id.is_empty() && !self.model_arn.is_empty()
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the debug sidebar on startup
    pub show_sidebar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { show_sidebar: true }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir()?;
    let global_config = config_dir.join("config.toml");
    let local_config = PathBuf::from(".kbchat/config.toml");

    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    // Add global config if it exists
    if global_config.exists() {
        figment = figment.merge(Toml::file(&global_config));
    }

    // Add local config if it exists
    if local_config.exists() {
        figment = figment.merge(Toml::file(&local_config));
    }

    // KBCHAT_REGION / KBCHAT_ENDPOINT style overrides
    figment = figment.merge(Env::prefixed("KBCHAT_"));

    // The two identifiers keep their historical un-prefixed variable names
    figment = figment.merge(
        Env::raw()
            .only(&["BEDROCK_KB_ID", "MODEL_ARN"])
            .map(|key| {
                key.as_str()
                    .trim_start_matches("BEDROCK_")
                    .to_lowercase()
                    .into()
            }),
    );

    figment.extract().context("Failed to load configuration")
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "kbchat") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("kbchat");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config_file = config_dir.join("config.toml");

    if !config_file.exists() {
        let default_config = Config::default();
        save_config(&default_config, Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    }

    // Create example local config
    let local_example = PathBuf::from(".kbchat/config.toml.example");
    if !local_example.exists() {
        if let Some(parent) = local_example.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let example_config = r#"# kbchat project configuration
# Values here override the global config for this directory

kb_id = "KB123EXAMPLE"
model_arn = "arn:aws:bedrock:us-east-1::foundation-model/anthropic.claude-3-sonnet-20240229-v1:0"
region = "us-east-1"

[ui]
show_sidebar = true
"#;
        std::fs::write(&local_example, example_config)?;
        println!("Created example configuration at: {}", local_example.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_leave_the_identifiers_empty() {
        let config = Config::default();

        assert_eq!(config.kb_id, "");
        assert_eq!(config.model_arn, "");
        assert_eq!(config.region, DEFAULT_REGION);
        assert!(!config.has_required_ids());
    }

    #[test]
    fn environment_variables_fill_the_identifiers() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("HOME", jail.directory().display().to_string());
            jail.set_env(
                "XDG_CONFIG_HOME",
                jail.directory().join("config").display().to_string(),
            );
            jail.set_env("BEDROCK_KB_ID", "KB123EXAMPLE");
            jail.set_env("MODEL_ARN", "arn:aws:bedrock:us-east-1::foundation-model/test");
            jail.set_env("KBCHAT_REGION", "eu-west-1");

            let config = load_config().expect("config should load");
            assert_eq!(config.kb_id, "KB123EXAMPLE");
            assert_eq!(
                config.model_arn,
                "arn:aws:bedrock:us-east-1::foundation-model/test"
            );
            assert_eq!(config.region, "eu-west-1");
            assert!(config.has_required_ids());
            Ok(())
        });
    }

    #[test]
    fn partial_environment_still_loads() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("HOME", jail.directory().display().to_string());
            jail.set_env(
                "XDG_CONFIG_HOME",
                jail.directory().join("config").display().to_string(),
            );
            jail.set_env("BEDROCK_KB_ID", "KB123EXAMPLE");

            let config = load_config().expect("config should load");
            assert_eq!(config.kb_id, "KB123EXAMPLE");
            assert_eq!(config.model_arn, "");
            assert!(!config.has_required_ids());
            Ok(())
        });
    }
}
