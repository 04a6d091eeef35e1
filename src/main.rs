// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use url_anatomy::{
    config::{OutputFormat, ScanConfig},
    logging,
    scan::{scan_reader, ScanSummary},
    UrlMatcher,
};

const STDIN_SOURCE: &str = "-";

const EXIT_MATCHED: u8 = 0;
const EXIT_NO_MATCH: u8 = 1;
const EXIT_ERROR: u8 = 2;

/// Match each line against the URL-shaped expression and print its segments.
#[derive(Debug, Parser)]
#[command(name = "url-anatomy", version)]
#[command(about = "Match lines against the classic URL regular expression", long_about = None)]
struct Cli {
    /// Files to read, "-" or none for the standard input.
    files: Vec<PathBuf>,

    /// TOML file with scan options, flags given here take precedence.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Also print the lines that do not match.
    #[arg(long)]
    rejected: bool,

    /// Print why each rejected line does not match (implies --rejected).
    #[arg(long)]
    explain: bool,

    /// Strip surrounding whitespace before matching.
    #[arg(long)]
    trim: bool,

    /// Print "matched N of M lines" to the standard error.
    #[arg(long)]
    summary: bool,

    /// Print the expression and its stages, then exit.
    #[arg(long)]
    pattern: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn scan_config(&self) -> Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::load(path)?,
            None => ScanConfig::default(),
        };

        if let Some(format) = self.format {
            config.format = format;
        }
        if self.rejected || self.explain {
            config.show_rejected = true;
        }
        if self.explain {
            config.explain_rejections = true;
        }
        if self.trim {
            config.trim_lines = true;
        }
        if self.summary {
            config.summary = true;
        }

        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.verbose) {
        eprintln!("url-anatomy error: {:#}", err);
        return ExitCode::from(EXIT_ERROR);
    }

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match run(&cli, &mut io::stdin().lock(), &mut writer, &mut io::stderr()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("url-anatomy error: {:#}", err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Scan the sources named on the command line and decide the exit status.
///
/// "-" reads from `stdin`, reports go to `out`, and the summary line goes to `err`.
fn run<R, W, E>(cli: &Cli, stdin: &mut R, out: &mut W, err: &mut E) -> Result<u8>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let matcher = UrlMatcher::new();

    if cli.pattern {
        writeln!(out, "{}", matcher.pattern())?;
        writeln!(out, "{}", matcher.debug_text())?;
        out.flush()?;
        return Ok(EXIT_MATCHED);
    }

    let config = cli.scan_config()?;
    tracing::debug!("scan config: {:?}", config);

    let mut total = ScanSummary::default();

    let sources: Vec<PathBuf> = if cli.files.is_empty() {
        vec![PathBuf::from(STDIN_SOURCE)]
    } else {
        cli.files.clone()
    };

    for path in &sources {
        let source = path.display().to_string();
        let summary = if source == STDIN_SOURCE {
            scan_reader(&matcher, &source, &mut *stdin, out, &config)?
        } else {
            let file = File::open(path)
                .with_context(|| format!("failed to open \"{}\"", path.display()))?;
            scan_reader(&matcher, &source, BufReader::new(file), out, &config)
                .with_context(|| format!("failed to scan \"{}\"", path.display()))?
        };

        total += summary;
    }

    out.flush()?;

    if config.summary {
        writeln!(err, "matched {} of {} lines", total.matched, total.lines)?;
    }

    if total.matched > 0 {
        Ok(EXIT_MATCHED)
    } else {
        Ok(EXIT_NO_MATCH)
    }
}
