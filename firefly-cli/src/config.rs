use anyhow::{Context, Result, bail};
use firefly_ingest::{OutputFormat, Quoting};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::home::{default_config_path, ensure_firefly_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log: LogSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// tracing filter used when RUST_LOG is unset (e.g. "info", "firefly_ingest=debug")
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Overrides applied on top of each converter's own CSV layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub delimiter: Option<String>,
    pub quote_all: Option<bool>,
    pub bom: Option<bool>,
}

impl OutputSection {
    pub fn apply(&self, mut format: OutputFormat) -> Result<OutputFormat> {
        if let Some(d) = &self.delimiter {
            let bytes = d.as_bytes();
            if bytes.len() != 1 {
                bail!("output.delimiter must be a single ASCII character, got {:?}", d);
            }
            format.delimiter = bytes[0];
        }
        if let Some(quote_all) = self.quote_all {
            format.quoting = if quote_all { Quoting::All } else { Quoting::Minimal };
        }
        if let Some(bom) = self.bom {
            format.bom = bom;
        }
        Ok(format)
    }
}

/// Load `path`, or the default location when `None`. A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the default config unless one already exists; returns its path.
pub fn init_config(path: Option<&Path>) -> Result<PathBuf> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => ensure_firefly_home()?.join("config.toml"),
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(p);
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(p)
}
