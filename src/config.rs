use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::matching::{OccurrenceMode, DEFAULT_CONTEXT_CHARS};
use crate::output::{TsvOptions, DEFAULT_LINK_PREFIX};

pub const DEFAULT_CONFIG_FILE: &str = "twl.toml";
pub const DEFAULT_KEYWORDS_OUTDIR: &str = "./keywords";
pub const MAX_CONTEXT_CHARS: usize = 500;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub context_chars: usize,
    pub link_prefix: String,
    pub include_header: bool,
    pub occurrence: OccurrenceMode,
    pub strict: bool,
    pub keywords_outdir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context_chars: DEFAULT_CONTEXT_CHARS,
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            include_header: true,
            occurrence: OccurrenceMode::default(),
            strict: false,
            keywords_outdir: PathBuf::from(DEFAULT_KEYWORDS_OUTDIR),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.context_chars > MAX_CONTEXT_CHARS {
            return Err(ConfigError::Invalid {
                key: "context_chars",
                reason: format!("{} exceeds the maximum of {MAX_CONTEXT_CHARS}", self.context_chars),
            });
        }
        if self.link_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "link_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Command-line values win over file values.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if overrides.strict {
            self.strict = true;
        }
        if let Some(outdir) = &overrides.keywords_outdir {
            self.keywords_outdir = outdir.clone();
        }
    }

    pub fn tsv_options(&self) -> TsvOptions {
        TsvOptions {
            link_prefix: self.link_prefix.clone(),
            include_header: self.include_header,
            context_chars: self.context_chars,
            occurrence: self.occurrence,
        }
    }
}

/// Settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub strict: bool,
    pub keywords_outdir: Option<PathBuf>,
}

pub fn load_config_from_file(file_path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(file_path).map_err(|source| ConfigError::Read {
        path: file_path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: file_path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    debug!(path = %file_path.display(), "loaded config");
    Ok(config)
}

/// Loads `explicit` if given, otherwise [`DEFAULT_CONFIG_FILE`] when it
/// exists, otherwise the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => load_config_from_file(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                load_config_from_file(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}
