// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialize structured logging to the standard error.
///
/// `RUST_LOG` takes precedence, otherwise the filter is derived from the
/// number of `-v` flags. The standard output is left to the scan results.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))?;

    tracing::debug!("logging initialized, verbosity {}", verbosity);

    Ok(())
}

fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,url_anatomy=debug",
        _ => "warn,url_anatomy=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::default_filter;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(0), "warn");
        assert_eq!(default_filter(1), "warn,url_anatomy=debug");
        assert_eq!(default_filter(5), "warn,url_anatomy=trace");
    }
}
