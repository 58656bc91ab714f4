// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use log::LevelFilter;
use serde::Deserialize;
use splitbill_app::DEFAULT_IMAGE_REF;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "splitbill";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ledger: Ledger,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ledger: Ledger::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ledger {
    pub seed_demo: Option<bool>,
    pub default_image_ref: Option<String>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            seed_demo: Some(true),
            default_image_ref: Some(DEFAULT_IMAGE_REF.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("SPLITBILL_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set SPLITBILL_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and keep values under [ledger] and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(image_ref) = &self.ledger.default_image_ref
            && image_ref.trim().is_empty()
        {
            bail!(
                "ledger.default_image_ref in {} must not be empty",
                path.display()
            );
        }

        if let Some(level) = &self.log.level {
            parse_level(level).with_context(|| format!("invalid log.level in {}", path.display()))?;
        }

        Ok(())
    }

    pub fn seed_demo(&self) -> bool {
        self.ledger.seed_demo.unwrap_or(true)
    }

    pub fn default_image_ref(&self) -> &str {
        self.ledger
            .default_image_ref
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_REF)
    }

    pub fn log_level(&self) -> Result<LevelFilter> {
        parse_level(self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# splitbill config\n# Place this file at: {}\n\nversion = 1\n\n[ledger]\n# Start each session with the demo friends.\nseed_demo = true\n# Image reference prefilled in the add-friend panel.\ndefault_image_ref = \"{}\"\n\n[log]\n# off, error, warn, info, debug or trace. RUST_LOG overrides this.\nlevel = \"{}\"\n",
            path.display(),
            DEFAULT_IMAGE_REF,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter> {
    raw.parse::<LevelFilter>().map_err(|_| {
        anyhow!("invalid log level {raw:?}; use one of: off, error, warn, info, debug, trace")
    })
}

#[cfg(test)]
mod tests {
    use super::{Config, parse_level};
    use anyhow::Result;
    use log::LevelFilter;
    use splitbill_app::DEFAULT_IMAGE_REF;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert!(config.seed_demo());
        assert_eq!(config.default_image_ref(), DEFAULT_IMAGE_REF);
        assert_eq!(config.log_level()?, LevelFilter::Warn);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ledger]\nseed_demo = false\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[ledger] and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[ledger]\nseed_demo = false\ndefault_image_ref = \"https://avatars.test/64\"\n[log]\nlevel = \"debug\"\n",
        )?;

        let config = Config::load(&path)?;
        assert!(!config.seed_demo());
        assert_eq!(config.default_image_ref(), "https://avatars.test/64");
        assert_eq!(config.log_level()?, LevelFilter::Debug);
        Ok(())
    }

    #[test]
    fn sections_are_optional() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n")?;
        let config = Config::load(&path)?;
        assert!(config.seed_demo());
        assert_eq!(config.log_level()?, LevelFilter::Warn);
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn empty_default_image_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ledger]\ndefault_image_ref = \"  \"\n")?;
        let error = Config::load(&path).expect_err("blank image should fail");
        assert!(error.to_string().contains("must not be empty"));
        Ok(())
    }

    #[test]
    fn unknown_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"loud\"\n")?;
        let error = Config::load(&path).expect_err("bad level should fail");
        let message = format!("{error:#}");
        assert!(message.contains("invalid log.level"), "got {message}");
        assert!(message.contains("loud"), "got {message}");
        Ok(())
    }

    #[test]
    fn log_levels_parse_case_insensitively() -> Result<()> {
        assert_eq!(parse_level("off")?, LevelFilter::Off);
        assert_eq!(parse_level("INFO")?, LevelFilter::Info);
        assert_eq!(parse_level("trace")?, LevelFilter::Trace);
        assert!(parse_level("verbose").is_err());
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("SPLITBILL_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("SPLITBILL_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("SPLITBILL_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("splitbill/config.toml"));
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_loader() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[ledger]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert!(config.seed_demo());
        Ok(())
    }
}
