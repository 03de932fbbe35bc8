//! `genie.toml` settings.
//!
//! Every key is optional. Values given on the command line take precedence,
//! then the config file, then the built-in defaults.
//!
//! ```toml
//! project_id = "syn2"
//! store = "/data/genie-store"
//! format_registry_packages = ["genie", "example_registry"]
//! skip_missing_packages = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::debug;

use genie_validate::LoadPolicy;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "genie.toml";

/// Where the local platform store lives when neither flag nor config names one.
pub const DEFAULT_STORE_DIR: &str = ".genie-store";

pub const DEFAULT_PACKAGES: &[&str] = &["genie"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenieConfig {
    pub project_id: Option<String>,
    pub store: Option<PathBuf>,
    pub format_registry_packages: Option<Vec<String>>,
    pub skip_missing_packages: bool,
}

impl GenieConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("load config {}", path.display()))
    }

    /// Load `explicit` if given, else `genie.toml` under `dir` if it exists,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "using config file");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    pub fn project_id(&self, cli: Option<&str>) -> Result<String> {
        match cli.or(self.project_id.as_deref()) {
            Some(id) if !id.trim().is_empty() => Ok(id.to_string()),
            _ => bail!("no project id: pass --project-id or set project_id in {DEFAULT_CONFIG_FILE}"),
        }
    }

    pub fn store(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.store.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR))
    }

    /// Packages to load, in order.
    pub fn packages(&self, cli: &[String]) -> Vec<String> {
        if !cli.is_empty() {
            return cli.to_vec();
        }
        match &self.format_registry_packages {
            Some(packages) => packages.clone(),
            None => DEFAULT_PACKAGES.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn load_policy(&self) -> LoadPolicy {
        if self.skip_missing_packages {
            LoadPolicy::SkipMissing
        } else {
            LoadPolicy::Propagate
        }
    }
}
