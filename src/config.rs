//! Search settings, read from a YAML file
//
//  Copyright 2026 stockpig developers
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! A configuration file may set any of the fields of [`SearchConfig`](struct.SearchConfig.html);
//! the rest keep their defaults.
//!
//! ```yaml
//! depth: 5
//! quiescence_depth: 6
//! algorithm: quiescence
//! ```
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Directory under the home directory holding the default configuration file
pub const APP_DIR: &str = ".stockpig";

/// Name of the default configuration file
pub const CONFIG_FILE: &str = "config.yaml";

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which search to run
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Plain minimax
    Minimax,
    /// Minimax with alpha-beta pruning
    AlphaBeta,
    /// Alpha-beta followed by a quiescence search at the horizon
    Quiescence,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alphabeta",
            Algorithm::Quiescence => "quiescence",
        }.fmt(f)
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "alphabeta" | "alpha-beta" => Ok(Algorithm::AlphaBeta),
            "quiescence" => Ok(Algorithm::Quiescence),
            _ => Err(ConfigError(format!("{}: unknown search algorithm", s))),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Settings for a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Nominal depth in plies
    pub depth: usize,
    /// Further plies a quiescence search may go past the nominal depth
    pub quiescence_depth: usize,
    /// The search to run
    pub algorithm: Algorithm,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 4,
            quiescence_depth: 4,
            algorithm: Algorithm::AlphaBeta,
        }
    }
}

impl SearchConfig {
    /// Parses a configuration from YAML
    pub fn from_yaml(s: &str) -> Result<SearchConfig, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Reads a configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<SearchConfig, ConfigError> {
        let s = read_to_string(path)
            .map_err(|err| ConfigError(format!("{}: {}", path.display(), err)))?;
        SearchConfig::from_yaml(&s)
            .map_err(|err| ConfigError(format!("{}: {}", path.display(), err)))
    }

    /// Returns the path of the default configuration file, if there is a home directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads the configuration from `path` if one is given. Otherwise loads the default
    /// configuration file if it exists, or falls back on the defaults.
    pub fn load(path: Option<&Path>) -> Result<SearchConfig, ConfigError> {
        if let Some(path) = path {
            info!("reading configuration from {}", path.display());
            return SearchConfig::from_file(path);
        }

        match SearchConfig::default_path() {
            Some(path) if path.is_file() => {
                info!("reading configuration from {}", path.display());
                SearchConfig::from_file(&path)
            }
            _ => {
                debug!("no configuration file, using defaults");
                Ok(SearchConfig::default())
            }
        }
    }

    /// Serializes the configuration as YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A configuration which could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError { }

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError(err.to_string())
    }
}
