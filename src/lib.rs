// Copyright (c) 2024 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE, LICENSE.additional and CONTRIBUTING.

mod context;
mod process;

pub mod config;
pub mod error;
pub mod location;
pub mod logging;
pub mod matcher;
pub mod report;
pub mod route;
pub mod scan;
pub mod transition;

pub use error::{Result, UrlAnatomyError};
pub use matcher::{LineMatches, Match, MatchResult, Rejection, UrlMatcher};
pub use route::{StageName, PATTERN};
