use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use walkie_core::Timings;

/// Contents of the optional TOML configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    /// Seed for randomised levels.
    pub(crate) seed: Option<u64>,
    /// Level started on launch.
    pub(crate) start_level: Option<String>,
    /// JSON level pack, relative to the configuration file.
    pub(crate) level_pack: Option<PathBuf>,
    /// Popover and interstitial delays.
    pub(crate) timings: Timings,
}

/// Reads the configuration file at `path`.
pub(crate) fn load(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration at {}", path.display()))?;
    let mut config = parse(&contents)
        .with_context(|| format!("failed to parse configuration at {}", path.display()))?;
    if let (Some(pack), Some(base)) = (config.level_pack.as_mut(), path.parent()) {
        if pack.is_relative() {
            *pack = base.join(&*pack);
        }
    }
    tracing::debug!("loaded configuration from {}", path.display());
    Ok(config)
}

fn parse(contents: &str) -> Result<FileConfig> {
    toml::from_str(contents).context("invalid configuration toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(parse("").expect("empty config"), FileConfig::default());
    }

    #[test]
    fn full_file_is_read() {
        let config = parse(
            r#"
            seed = 7
            start_level = "/12"
            level_pack = "extra-levels.json"

            [timings]
            input_cooldown_ms = 300
            "#,
        )
        .expect("valid config");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.start_level.as_deref(), Some("/12"));
        assert_eq!(config.level_pack, Some(PathBuf::from("extra-levels.json")));
        assert_eq!(config.timings.input_cooldown, Duration::from_millis(300));
        assert_eq!(config.timings.browse_delay, Duration::from_millis(2_000));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("speed = 3").is_err());
    }
}
