use anyhow::{Context, Result};
use pennywise_finance::StageDelays;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineSection,
    pub output: OutputSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    /// Run stages one at a time with progress output
    pub staged: bool,
    /// Simulated processing time before categorization
    pub categorize_delay_ms: u64,
    /// Simulated processing time before recommendations
    pub recommend_delay_ms: u64,
}

impl PipelineSection {
    pub fn delays(&self) -> StageDelays {
        StageDelays {
            categorize: Duration::from_millis(self.categorize_delay_ms),
            recommend: Duration::from_millis(self.recommend_delay_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
    /// Ledger rows shown in text mode
    pub max_rows: usize,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            max_rows: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// EnvFilter directive used when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// `$PENNYWISE_HOME`, else `~/.pennywise`
pub fn pennywise_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PENNYWISE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".pennywise"))
}

pub fn ensure_pennywise_home() -> Result<PathBuf> {
    let dir = pennywise_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(pennywise_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = ensure_pennywise_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    println!("# {}", config_path()?.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let cfg = parse_config(
            r#"
[pipeline]
staged = true
categorize_delay_ms = 1000

[output]
format = "json"
"#,
        )
        .unwrap();
        assert!(cfg.pipeline.staged);
        assert_eq!(cfg.pipeline.delays().categorize, Duration::from_secs(1));
        assert_eq!(cfg.pipeline.delays().recommend, Duration::ZERO);
        assert_eq!(cfg.output.format, OutputFormat::Json);
        assert_eq!(cfg.output.max_rows, 10);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(parse_config("[output]\nformat = \"xml\"\n").is_err());
    }
}
