// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Result, UrlAnatomyError};

/// How scanned lines are written out.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One tab-separated line per result.
    #[default]
    Text,
    /// One JSON object per result.
    Json,
}

/// Scanner options, loaded from a TOML file such as:
///
/// ```toml
/// format = "json"
/// show_rejected = true
/// explain_rejections = true
/// ```
///
/// Missing keys take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub format: OutputFormat,
    /// Also write the lines that do not match.
    pub show_rejected: bool,
    /// Attach the failing stage and column to rejected lines.
    pub explain_rejections: bool,
    /// Strip leading and trailing whitespace before evaluating a line.
    pub trim_lines: bool,
    /// Print "matched N of M lines" when the scan is done.
    pub summary: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_rejected: false,
            explain_rejections: false,
            trim_lines: false,
            summary: false,
        }
    }
}

impl ScanConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&data).map_err(|e| UrlAnatomyError::ConfigError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
