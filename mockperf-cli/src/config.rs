//! Configuration loading from mockperf.toml
//!
//! A `mockperf.toml` declares the options to register, the runner metadata and
//! the sentinel timing value. It is discovered by walking up from the current
//! directory.

use anyhow::Context;
use mockperf_core::{ArgOptions, ArgValue, FixedClock, Runner, SENTINEL_TIME};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Config file name looked up by `MockperfConfig::discover`
pub const CONFIG_FILE_NAME: &str = "mockperf.toml";

/// mockperf configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MockperfConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Descriptive tags attached to the runner
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Options registered on the runner, in order
    #[serde(default, rename = "option")]
    pub options: Vec<OptionConfig>,
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Timing value passed to timed benchmarks
    #[serde(default = "default_sentinel")]
    pub sentinel: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            sentinel: default_sentinel(),
        }
    }
}

fn default_sentinel() -> u64 {
    SENTINEL_TIME
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` env-filter directive used when `--verbose` is not given
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "mockperf=info".to_string()
}

/// One `[[option]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionConfig {
    /// Option name, e.g. "--num-points"
    pub name: String,
    /// Default value; absent means none
    #[serde(default)]
    pub default: ArgValue,
    /// Help text (accepted, has no effect)
    #[serde(default)]
    pub help: Option<String>,
}

impl MockperfConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Discover and load configuration by walking up from current directory.
    ///
    /// `Ok(None)` when no config file exists; a file that exists but fails to
    /// load is an error.
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let dir = std::env::current_dir().context("Failed to read current directory")?;
        Self::discover_from(&dir)
    }

    /// Discover configuration by walking up from `start`
    pub fn discover_from(start: &Path) -> anyhow::Result<Option<Self>> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Build a runner with this configuration's clock, metadata and options
    pub fn build_runner(&self) -> Runner {
        let mut runner = Runner::new().with_clock(FixedClock(self.runner.sentinel));
        for (key, value) in &self.metadata {
            runner.add_metadata(key.as_str(), value.as_str());
        }
        for option in &self.options {
            let mut options = ArgOptions::new();
            if let Some(help) = &option.help {
                options = options.help(help.as_str());
            }
            runner
                .argparser_mut()
                .register_with(&option.name, option.default.clone(), options);
        }
        runner
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# mockperf Configuration

[runner]
# Timing value handed to timed benchmarks instead of a clock reading
sentinel = 42

[logging]
# tracing filter directive (overridden by --verbose)
filter = "mockperf=info"

[metadata]
# Descriptive tags attached to the runner
# description = "operator dispatch fixtures"

# Options registered on the runner. Dashes are normalized to underscores
# and a leading "--" is dropped, so this exposes `num_points`.
[[option]]
name = "--num-points"
default = 100
help = "Number of points to add"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MockperfConfig::default();
        assert_eq!(config.runner.sentinel, 42);
        assert_eq!(config.logging.filter, "mockperf=info");
        assert!(config.options.is_empty());
        assert!(config.build_runner().parse_args().is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            sentinel = 7

            [metadata]
            description = "equality dispatch"

            [[option]]
            name = "--inner-loops"
            default = 3

            [[option]]
            name = "--label"

            [[option]]
            name = "inner-loops"
            default = "many"
        "#;

        let config: MockperfConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.sentinel, 7);
        assert_eq!(config.options.len(), 3);
        assert!(config.options[1].default.is_none());
        // Defaults should still apply
        assert_eq!(config.logging.filter, "mockperf=info");

        let runner = config.build_runner();
        let args = runner.parse_args();
        assert_eq!(args.len(), 2);
        assert_eq!(args.get_str("inner_loops").unwrap(), "many");
        assert!(args.get("label").unwrap().is_none());
        assert_eq!(runner.metadata()["description"], "equality dispatch");
    }

    #[test]
    fn test_build_runner_uses_sentinel() {
        let mut config = MockperfConfig::default();
        config.runner.sentinel = 1000;
        let runner = config.build_runner();

        let mut seen = 0;
        runner
            .run_timed(
                "probe",
                |(t,)| {
                    seen = t;
                    Ok::<_, std::convert::Infallible>(())
                },
                (),
            )
            .unwrap();
        assert_eq!(seen, 1000);
    }

    #[test]
    fn test_default_toml_parses() {
        let config: MockperfConfig = toml::from_str(&MockperfConfig::default_toml()).unwrap();
        assert_eq!(config.runner.sentinel, 42);
        let runner = config.build_runner();
        assert_eq!(runner.parse_args().get_int("num_points").unwrap(), 100);
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("mockperf-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        dir
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = scratch_dir("discover-ok");
        std::fs::write(dir.join(CONFIG_FILE_NAME), "[runner]\nsentinel = 9\n").unwrap();

        let config = MockperfConfig::discover_from(&dir.join("nested"))
            .unwrap()
            .expect("config should be found in parent directory");
        assert_eq!(config.runner.sentinel, 9);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_discover_invalid_file_fails() {
        let dir = scratch_dir("discover-invalid");
        std::fs::write(
            dir.join(CONFIG_FILE_NAME),
            "[runner]\nsentinel = \"not a number\"\n",
        )
        .unwrap();

        let err = MockperfConfig::discover_from(&dir.join("nested")).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = MockperfConfig::load("/nonexistent/mockperf.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
