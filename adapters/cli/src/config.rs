use std::{fs, path::Path};

use anyhow::{Context, Result};
use mahjong_solitaire_system_generation::GenerationTuning;
use serde::Deserialize;

const DEFAULT_MAX_SHUFFLES: u32 = 3;

/// Settings read from the optional TOML configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Retry budgets used when dealing and shuffling.
    pub(crate) generation: GenerationTuning,
    /// Shuffles the autoplayer may spend before giving up on a stuck board.
    pub(crate) max_shuffles: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            generation: GenerationTuning::default(),
            max_shuffles: DEFAULT_MAX_SHUFFLES,
        }
    }
}

/// Loads the configuration file, or the defaults when no path is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<CliConfig> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("invalid config file at {}", path.display()))
}

fn parse_config(contents: &str) -> Result<CliConfig> {
    toml::from_str(contents).context("failed to parse config toml contents")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).expect("defaults");
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.max_shuffles, DEFAULT_MAX_SHUFFLES);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = parse_config(
            r#"
max_shuffles = 7

[generation]
generation_attempts = 10
"#,
        )
        .expect("valid config");

        assert_eq!(config.max_shuffles, 7);
        assert_eq!(config.generation.generation_attempts, 10);
        assert_eq!(config.generation.shuffle_attempts, 20);
        assert!(config.generation.refine_same_rows);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = parse_config("shuffles = 2").expect_err("unknown key");
        assert!(format!("{error:#}").contains("failed to parse config toml contents"));
    }

    #[test]
    fn unreadable_file_names_its_path() {
        let path = Path::new("/definitely/not/here.toml");
        let error = load_config(Some(path)).expect_err("missing file");
        assert!(error.to_string().contains("/definitely/not/here.toml"));
    }
}
