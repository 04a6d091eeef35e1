// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{
    io::{BufRead, Write},
    ops::AddAssign,
};

use crate::{
    config::ScanConfig,
    error::Result,
    matcher::UrlMatcher,
    report::{write_report, LineReport},
};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct ScanSummary {
    pub lines: usize,
    pub matched: usize,
}

impl AddAssign for ScanSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.lines += rhs.lines;
        self.matched += rhs.matched;
    }
}

/// Evaluate every line read from `reader` and write the results to `writer`.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD, which no stage
/// accepts, so such lines are rejected rather than aborting the scan.
pub fn scan_reader<R: BufRead, W: Write>(
    matcher: &UrlMatcher,
    source: &str,
    mut reader: R,
    writer: &mut W,
    config: &ScanConfig,
) -> Result<ScanSummary> {
    let mut summary = ScanSummary::default();
    let mut buffer: Vec<u8> = vec![];
    let mut line_index = 0;

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }

        let raw = String::from_utf8_lossy(&buffer);
        let mut text = strip_line_terminator(&raw);
        if config.trim_lines {
            text = text.trim();
        }

        let result = matcher.evaluate(text);
        summary.lines += 1;

        tracing::debug!(source, line = line_index + 1, matched = result.is_match(), "evaluated line");

        if result.is_match() {
            summary.matched += 1;
            let report = LineReport::new(source, line_index, text, &result, None);
            write_report(writer, &report, config.format)?;
        } else if config.show_rejected {
            let rejection = if config.explain_rejections {
                matcher.diagnose(text).map(|r| r.with_line(line_index))
            } else {
                None
            };
            let report = LineReport::new(source, line_index, text, &result, rejection.as_ref());
            write_report(writer, &report, config.format)?;
        }

        line_index += 1;
    }

    tracing::debug!(source, lines = summary.lines, matched = summary.matched, "scan finished");

    Ok(summary)
}

fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        config::{OutputFormat, ScanConfig},
        matcher::UrlMatcher,
    };

    use super::{scan_reader, strip_line_terminator, ScanSummary};

    fn scan(input: &[u8], config: &ScanConfig) -> (String, ScanSummary) {
        let matcher = UrlMatcher::new();
        let mut output: Vec<u8> = vec![];
        let summary = scan_reader(&matcher, "in", input, &mut output, config).unwrap();
        (String::from_utf8(output).unwrap(), summary)
    }

    #[test]
    fn test_strip_line_terminator() {
        assert_eq!(strip_line_terminator("a.com\n"), "a.com");
        assert_eq!(strip_line_terminator("a.com\r\n"), "a.com");
        assert_eq!(strip_line_terminator("a.com"), "a.com");
        assert_eq!(strip_line_terminator("\n"), "");
    }

    #[test]
    fn test_scan_matched_only() {
        let input = b"example.com\nnot a url\r\nhttp://a.io/x\n";
        let (output, summary) = scan(input, &ScanConfig::default());

        assert_eq!(
            output,
            "in:1: example.com\tscheme=-\tdomain=example\ttld=com\tsuffix=\n\
             in:3: http://a.io/x\tscheme=http\tdomain=a\ttld=io\tsuffix=/x\n"
        );
        assert_eq!(summary, ScanSummary { lines: 3, matched: 2 });
    }

    #[test]
    fn test_scan_rejected_and_explained() {
        let config = ScanConfig {
            show_rejected: true,
            explain_rejections: true,
            ..ScanConfig::default()
        };
        let (output, summary) = scan(b"a.com\nexample.c", &config);

        assert_eq!(
            output,
            "in:1: a.com\tscheme=-\tdomain=a\ttld=com\tsuffix=\n\
             in:2: ! example.c\t(line 2, column 10: expected top-level domain)\n"
        );
        assert_eq!(summary, ScanSummary { lines: 2, matched: 1 });
    }

    #[test]
    fn test_scan_trim_lines() {
        let input = b"  example.com \n";

        let (_, summary) = scan(input, &ScanConfig::default());
        assert_eq!(summary.matched, 0);

        let config = ScanConfig {
            trim_lines: true,
            ..ScanConfig::default()
        };
        let (_, summary) = scan(input, &config);
        assert_eq!(summary.matched, 1);
    }

    #[test]
    fn test_scan_invalid_utf8() {
        let config = ScanConfig {
            show_rejected: true,
            ..ScanConfig::default()
        };
        let (output, summary) = scan(b"ex\xffample.com\nexample.com\n", &config);
        assert_eq!(summary, ScanSummary { lines: 2, matched: 1 });
        assert!(output.starts_with("in:1: ! ex\u{fffd}ample.com\n"));
    }

    #[test]
    fn test_scan_json() {
        let config = ScanConfig {
            format: OutputFormat::Json,
            ..ScanConfig::default()
        };
        let (output, _) = scan(b"example.com\n", &config);
        let value: serde_json::Value = serde_json::from_str(output.trim_end()).unwrap();
        assert_eq!(value["tld"], serde_json::json!("com"));
        assert_eq!(value["line"], serde_json::json!(1));
    }

    #[test]
    fn test_summary_add_assign() {
        let mut total = ScanSummary::default();
        total += ScanSummary { lines: 3, matched: 1 };
        total += ScanSummary { lines: 2, matched: 2 };
        assert_eq!(total, ScanSummary { lines: 5, matched: 3 });
    }
}
