// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::io::Write;

use serde::Serialize;

use crate::{
    config::OutputFormat,
    error::Result,
    matcher::{MatchResult, Rejection},
};

// Shown in place of an absent scheme in the text format.
const ABSENT: &str = "-";

/// The rendering of one scanned line.
#[derive(Debug, PartialEq, Serialize)]
pub struct LineReport<'a> {
    pub source: &'a str,
    pub line: usize, // 1-based
    pub text: &'a str,
    pub matched: bool,
    pub scheme: Option<&'a str>,
    pub domain: Option<&'a str>,
    pub tld: Option<&'a str>,
    pub suffix: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
}

impl<'a> LineReport<'a> {
    pub fn new(
        source: &'a str,
        line_index: usize,
        text: &'a str,
        result: &MatchResult<'a>,
        rejection: Option<&Rejection>,
    ) -> Self {
        LineReport {
            source,
            line: line_index + 1,
            text,
            matched: result.is_match(),
            scheme: result.scheme(),
            domain: result.domain(),
            tld: result.top_level_domain(),
            suffix: result.suffix(),
            rejection: rejection.map(|r| r.to_string()),
        }
    }

    /// Render as `source:line: text`, followed by the tab-separated segments
    /// for a matched line, or prefixed with "!" for a rejected line.
    pub fn to_text(&self) -> String {
        if self.matched {
            format!(
                "{}:{}: {}\tscheme={}\tdomain={}\ttld={}\tsuffix={}",
                self.source,
                self.line,
                self.text,
                self.scheme.unwrap_or(ABSENT),
                self.domain.unwrap_or_default(),
                self.tld.unwrap_or_default(),
                self.suffix.unwrap_or_default(),
            )
        } else {
            match &self.rejection {
                Some(reason) => format!("{}:{}: ! {}\t({})", self.source, self.line, self.text, reason),
                None => format!("{}:{}: ! {}", self.source, self.line, self.text),
            }
        }
    }
}

pub fn write_report<W: Write>(writer: &mut W, report: &LineReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(writer, "{}", report.to_text())?;
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, report)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
