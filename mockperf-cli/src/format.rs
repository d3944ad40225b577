//! Output Formatting
//!
//! Renders settings and metadata as human-readable text or JSON.

use mockperf_core::Args;
use std::collections::BTreeMap;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// Pretty-printed JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render resolved settings
pub fn format_settings(args: &Args, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(args),
        OutputFormat::Human => {
            if args.is_empty() {
                return Ok("(no options registered)\n".to_string());
            }
            let width = args
                .names()
                .map(|name| name.chars().count())
                .max()
                .unwrap_or(0);
            let mut out = String::new();
            for (name, value) in args.iter() {
                out.push_str(&format!("{:<width$} = {}\n", name, value, width = width));
            }
            Ok(out)
        }
    }
}

/// Render runner metadata
pub fn format_metadata(
    metadata: &BTreeMap<String, String>,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(metadata),
        OutputFormat::Human => {
            if metadata.is_empty() {
                return Ok("(no metadata)\n".to_string());
            }
            Ok(metadata
                .iter()
                .map(|(k, v)| format!("{}: {}\n", k, v))
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockperf_core::{ArgParser, ArgValue};

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("HUMAN".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_human_settings() {
        let mut parser = ArgParser::new();
        parser.register("--num-points", 100);
        parser.register("--tag", "x");
        parser.register("--out", ArgValue::None);
        let text = format_settings(parser.resolved(), OutputFormat::Human).unwrap();
        assert_eq!(text, "num_points = 100\nout        = None\ntag        = \"x\"\n");
    }

    #[test]
    fn test_human_settings_non_ascii_names() {
        let mut parser = ArgParser::new();
        parser.register("--größe", 1);
        parser.register("--n", 2);
        let text = format_settings(parser.resolved(), OutputFormat::Human).unwrap();
        assert_eq!(text, "größe = 1\nn     = 2\n");
    }

    #[test]
    fn test_empty_settings() {
        let parser = ArgParser::new();
        let text = format_settings(parser.resolved(), OutputFormat::Human).unwrap();
        assert_eq!(text, "(no options registered)\n");
        let json = format_settings(parser.resolved(), OutputFormat::Json).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_json_settings() {
        let mut parser = ArgParser::new();
        parser.register("--fast", true);
        let json = format_settings(parser.resolved(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["fast"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_metadata() {
        let mut metadata = BTreeMap::new();
        assert_eq!(
            format_metadata(&metadata, OutputFormat::Human).unwrap(),
            "(no metadata)\n"
        );
        metadata.insert("b".to_string(), "2".to_string());
        metadata.insert("a".to_string(), "1".to_string());
        assert_eq!(
            format_metadata(&metadata, OutputFormat::Human).unwrap(),
            "a: 1\nb: 2\n"
        );
    }
}
