// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{
    fmt::Display,
    ops::{Index, Range},
    str::Lines,
};

use crate::{
    context::Context,
    location::Location,
    process::{start_process, MatchRanges},
    route::{
        get_capture_group_index_by_name, Route, StageName, DOMAIN_GROUP_INDEX, PATTERN,
        SCHEME_GROUP_INDEX, SUFFIX_GROUP_INDEX, TLD_GROUP_INDEX,
    },
};

/// Whole-line matcher for the URL-shaped expression
/// `^(https?:\/\/)?([\da-z\.-]+)\.([a-z\.]{2,6})([\/\w \.-]*)*\/?$`.
///
/// The matcher holds no per-call state, a single instance can be shared
/// between threads.
#[derive(Debug)]
pub struct UrlMatcher {
    pub route: Route,
}

impl UrlMatcher {
    pub fn new() -> Self {
        UrlMatcher { route: Route::url() }
    }

    /// Test the entire line against the grammar and extract its segments.
    ///
    /// This never fails, a line that does not conform yields a result
    /// whose `is_match()` is false and whose segments are all absent.
    pub fn evaluate<'a>(&self, line: &'a str) -> MatchResult<'a> {
        let context = Context::from_bytes(line.as_bytes(), &self.route);
        match start_process(&context, &self.route) {
            Ok(match_ranges) => MatchResult::from_ranges(&self.route, line, &match_ranges),
            Err(_) => MatchResult::no_match(),
        }
    }

    pub fn is_match(&self, line: &str) -> bool {
        let context = Context::from_bytes(line.as_bytes(), &self.route);
        start_process(&context, &self.route).is_ok()
    }

    /// Explain why a line does not match.
    ///
    /// Returns `None` if the line matches, otherwise the stage that failed
    /// at the furthest position any attempt reached.
    pub fn diagnose(&self, line: &str) -> Option<Rejection> {
        let context = Context::from_bytes(line.as_bytes(), &self.route);
        match start_process(&context, &self.route) {
            Ok(_) => None,
            Err(failure) => Some(Rejection {
                stage: failure.stage,
                location: Location::from_byte_index(line, failure.position, 0),
            }),
        }
    }

    /// Evaluate each line of a multi-line text.
    ///
    /// Lines are split on "\n" and "\r\n", the terminators are not part of
    /// the evaluated line.
    pub fn evaluate_lines<'a, 'b>(&'a self, text: &'b str) -> LineMatches<'a, 'b> {
        LineMatches::new(self, text)
    }

    pub fn pattern(&self) -> &'static str {
        PATTERN
    }

    pub fn debug_text(&self) -> String {
        self.route.get_debug_text()
    }
}

impl Default for UrlMatcher {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LineMatches<'a, 'b> {
    matcher: &'a UrlMatcher,
    lines: Lines<'b>,
    line_index: usize,
}

impl<'a, 'b> LineMatches<'a, 'b> {
    fn new(matcher: &'a UrlMatcher, text: &'b str) -> Self {
        LineMatches {
            matcher,
            lines: text.lines(),
            line_index: 0,
        }
    }
}

impl<'b> Iterator for LineMatches<'_, 'b> {
    type Item = (usize, MatchResult<'b>);

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        let line_index = self.line_index;
        self.line_index += 1;
        Some((line_index, self.matcher.evaluate(line)))
    }
}

/// The outcome of evaluating one line.
///
/// Group 0 is the whole line, groups 1 to 4 are "scheme", "domain",
/// "tld" and "suffix". The scheme group holds "http" or "https" only,
/// the "://" that follows it is not part of the value.
#[derive(Debug, PartialEq, Clone)]
pub struct MatchResult<'a> {
    matches: Option<Vec<Option<Match<'a>>>>,
}

impl<'a> MatchResult<'a> {
    pub fn no_match() -> Self {
        MatchResult { matches: None }
    }

    fn from_ranges(route: &Route, text: &'a str, match_ranges: &MatchRanges) -> Self {
        let matches: Vec<Option<Match>> = match_ranges
            .iter()
            .enumerate()
            .map(|(idx, match_range)| {
                match_range.map(|range| {
                    Match::new(
                        range.start,
                        range.end,
                        route.get_capture_group_name_by_index(idx),
                        sub_string(text, range.start, range.end),
                    )
                })
            })
            .collect();

        MatchResult {
            matches: Some(matches),
        }
    }

    pub fn is_match(&self) -> bool {
        self.matches.is_some()
    }

    // the following methods are intended to
    // be compatible with the 'Captures' API of crate 'regex':
    // https://docs.rs/regex/latest/regex/struct.Captures.html

    pub fn get(&self, index: usize) -> Option<&Match<'a>> {
        self.matches.as_ref()?.get(index)?.as_ref()
    }

    pub fn name(&self, name: &str) -> Option<&Match<'a>> {
        self.get(get_capture_group_index_by_name(name)?)
    }

    pub fn scheme(&self) -> Option<&'a str> {
        self.get(SCHEME_GROUP_INDEX).map(|m| m.as_str())
    }

    pub fn domain(&self) -> Option<&'a str> {
        self.get(DOMAIN_GROUP_INDEX).map(|m| m.as_str())
    }

    pub fn top_level_domain(&self) -> Option<&'a str> {
        self.get(TLD_GROUP_INDEX).map(|m| m.as_str())
    }

    pub fn suffix(&self) -> Option<&'a str> {
        self.get(SUFFIX_GROUP_INDEX).map(|m| m.as_str())
    }
}

impl Index<usize> for MatchResult<'_> {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("The capture group {} did not participate in the match.", index))
            .as_str()
    }
}

impl Index<&str> for MatchResult<'_> {
    type Output = str;

    fn index(&self, name: &str) -> &Self::Output {
        self.name(name)
            .unwrap_or_else(|| panic!("Cannot find the capture group named \"{}\".", name))
            .as_str()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Match<'a> {
    pub start: usize, // the position of utf-8 byte stream (value included)
    pub end: usize,   // the position of utf-8 byte stream (value excluded)
    pub name: Option<&'static str>,
    pub value: &'a str,
}

impl<'a> Match<'a> {
    pub fn new(start: usize, end: usize, name: Option<&'static str>, value: &'a str) -> Self {
        Match {
            start,
            end,
            name,
            value,
        }
    }

    // the following methods are intended to
    // be compatible with the 'Match' API of crate 'regex':
    // https://docs.rs/regex/latest/regex/struct.Match.html

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn range(&self) -> Range<usize> {
        Range {
            start: self.start,
            end: self.end,
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.value
    }
}

/// Where and why a line was rejected.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Rejection {
    pub stage: StageName,
    pub location: Location,
}

impl Rejection {
    /// Place the rejection on a line of a multi-line input.
    pub fn with_line(&self, line: usize) -> Self {
        Rejection {
            stage: self.stage,
            location: self.location.with_line(line),
        }
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}, column {}: expected {}",
            self.location.line + 1,
            self.location.column + 1,
            self.stage
        )
    }
}

// Every range boundary produced by the process is adjacent to an ASCII byte
// or to an end of the line, so it always falls on a char boundary.
fn sub_string(text: &str, start: usize, end_excluded: usize) -> &str {
    text.get(start..end_excluded).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{location::Location, route::StageName};

    use super::{Match, MatchResult, Rejection, UrlMatcher};

    #[test]
    fn test_evaluate_segments() {
        let matcher = UrlMatcher::new();

        let result = matcher.evaluate("https://www.example.com");
        assert!(result.is_match());
        assert_eq!(result.scheme(), Some("https"));
        assert_eq!(result.domain(), Some("www.example"));
        assert_eq!(result.top_level_domain(), Some("com"));
        assert_eq!(result.suffix(), Some(""));

        let result = matcher.evaluate("example.com");
        assert!(result.is_match());
        assert_eq!(result.scheme(), None);
        assert_eq!(result.domain(), Some("example"));
        assert_eq!(result.top_level_domain(), Some("com"));
        assert_eq!(result.suffix(), Some(""));

        let result = matcher.evaluate("http://example.com/path/to file.html");
        assert!(result.is_match());
        assert_eq!(result.scheme(), Some("http"));
        assert_eq!(result.domain(), Some("example"));
        assert_eq!(result.top_level_domain(), Some("com"));
        assert_eq!(result.suffix(), Some("/path/to file.html"));
    }

    #[test]
    fn test_evaluate_no_match() {
        let matcher = UrlMatcher::new();

        for line in [
            "not a url",
            "",
            "ftp://example.com",
            "http://example.com/path/to file.html?x=1",
            "example.c",
            "Example.com",
        ] {
            let result = matcher.evaluate(line);
            assert_eq!(result, MatchResult::no_match(), "line: {:?}", line);
            assert!(!result.is_match());
            assert_eq!(result.scheme(), None);
            assert_eq!(result.domain(), None);
            assert_eq!(result.top_level_domain(), None);
            assert_eq!(result.suffix(), None);
            assert_eq!(result.get(0), None);
        }
    }

    #[test]
    fn test_captures_api() {
        let matcher = UrlMatcher::new();
        let result = matcher.evaluate("http://a-b.example.org/docs/");

        // test 'MatchResult::get'
        assert_eq!(
            result.get(0),
            Some(&Match::new(0, 28, None, "http://a-b.example.org/docs/"))
        );
        assert_eq!(result.get(1), Some(&Match::new(0, 4, Some("scheme"), "http")));
        assert_eq!(
            result.get(2),
            Some(&Match::new(7, 18, Some("domain"), "a-b.example"))
        );
        assert_eq!(result.get(3), Some(&Match::new(19, 22, Some("tld"), "org")));
        assert_eq!(
            result.get(4),
            Some(&Match::new(22, 28, Some("suffix"), "/docs/"))
        );
        assert_eq!(result.get(5), None);

        // test number index trait
        assert_eq!(&result[2], "a-b.example");

        // test 'MatchResult::name' and str index trait
        assert_eq!(result.name("tld").map(|m| m.range()), Some(19..22));
        assert_eq!(&result["suffix"], "/docs/");
        assert_eq!(result.name("port"), None);

        let suffix = result.get(4).unwrap();
        assert_eq!(suffix.start(), 22);
        assert_eq!(suffix.end(), 28);
        assert_eq!(suffix.len(), 6);
        assert!(!suffix.is_empty());
    }

    #[test]
    fn test_absent_scheme_group() {
        let matcher = UrlMatcher::new();
        let result = matcher.evaluate("example.com");
        assert_eq!(result.get(1), None);
        assert_eq!(result.name("scheme"), None);
        assert!(result.get(4).unwrap().is_empty());
    }

    #[test]
    #[should_panic]
    fn test_index_absent_group() {
        let matcher = UrlMatcher::new();
        let result = matcher.evaluate("example.com");
        let _ = &result[1];
    }

    #[test]
    fn test_is_match() {
        let matcher = UrlMatcher::new();
        assert!(matcher.is_match("example.com"));
        assert!(matcher.is_match("https://sub.example.co.uk/a/b"));
        assert!(!matcher.is_match("https://"));
        assert!(!matcher.is_match("example.com?"));
    }

    #[test]
    fn test_diagnose() {
        let matcher = UrlMatcher::new();
        assert_eq!(matcher.diagnose("example.com"), None);

        assert_eq!(
            matcher.diagnose("example.c"),
            Some(Rejection {
                stage: StageName::TopLevelDomain,
                location: Location::new_position(9, 0, 9)
            })
        );

        // the column counts characters
        assert_eq!(
            matcher.diagnose("example.com/文"),
            Some(Rejection {
                stage: StageName::End,
                location: Location::new_position(12, 0, 12)
            })
        );

        assert_eq!(
            matcher.diagnose("例子.com"),
            Some(Rejection {
                stage: StageName::Domain,
                location: Location::new_position(0, 0, 0)
            })
        );

        let rejection = matcher.diagnose("http://example.com/?q").unwrap();
        assert_eq!(
            rejection.to_string(),
            "line 1, column 20: expected end of line"
        );
    }

    #[test]
    fn test_evaluate_lines() {
        let matcher = UrlMatcher::new();
        let text = "example.com\r\nnot a url\n\nhttps://example.org/x\n";
        let results: Vec<(usize, Option<&str>)> = matcher
            .evaluate_lines(text)
            .map(|(idx, result)| (idx, result.domain()))
            .collect();

        assert_eq!(
            results,
            vec![
                (0, Some("example")),
                (1, None),
                (2, None),
                (3, Some("example"))
            ]
        );
    }

    #[test]
    fn test_pattern_and_debug_text() {
        let matcher = UrlMatcher::default();
        assert_eq!(
            matcher.pattern(),
            r"^(https?:\/\/)?([\da-z\.-]+)\.([a-z\.]{2,6})([\/\w \.-]*)*\/?$"
        );
        assert!(matcher.debug_text().starts_with("- $0 scheme"));
    }
}
