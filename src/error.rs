// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use thiserror::Error;

/// Errors of the line scanner and its configuration.
///
/// Matching itself never fails, a line that does not conform is reported
/// through `MatchResult::is_match()` instead.
#[derive(Error, Debug)]
pub enum UrlAnatomyError {
    #[error("Config error in \"{path}\": {message}")]
    ConfigError { path: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, UrlAnatomyError>;
