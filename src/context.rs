// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::route::Route;

/// Per-line evaluation state.
///
/// The tables are filled by one backward pass over the bytes, so that every
/// question the process asks while backtracking ("how long is the
/// top-level-domain run here", "where does the suffix run stop") is answered
/// in constant time.
pub struct Context<'a> {
    pub bytes: &'a [u8],

    // The length of the run of top-level-domain bytes starting at each
    // index, capped at the maximum repetition of the stage.
    // It has `bytes.len() + 1` entries, the last one is 0.
    pub tld_runs: Vec<usize>,

    // The first index at or after each index whose byte is not accepted
    // by the suffix stage, or `bytes.len()` if the rest of the line is accepted.
    // It has `bytes.len() + 1` entries.
    pub suffix_stops: Vec<usize>,
}

impl<'a> Context<'a> {
    pub fn from_bytes(bytes: &'a [u8], route: &Route) -> Self {
        let length = bytes.len();
        let tld = route.top_level_domain();
        let tld_max = tld.repetition_type.max();
        let suffix = &route.suffix().charset;

        let mut tld_runs = vec![0; length + 1];
        let mut suffix_stops = vec![length; length + 1];

        for idx in (0..length).rev() {
            let byte = bytes[idx];

            if tld.charset.matches(byte) {
                tld_runs[idx] = (tld_runs[idx + 1] + 1).min(tld_max);
            }

            if !suffix.matches(byte) {
                suffix_stops[idx] = idx;
            } else {
                suffix_stops[idx] = suffix_stops[idx + 1];
            }
        }

        Context {
            bytes,
            tld_runs,
            suffix_stops,
        }
    }

    /// Count the bytes accepted by the domain stage starting at `position`,
    /// capped at the maximum repetition of the stage.
    pub fn domain_run(&self, route: &Route, position: usize) -> usize {
        let domain = route.domain();
        let max = domain.repetition_type.max();
        self.bytes[position..]
            .iter()
            .take_while(|byte| domain.charset.matches(**byte))
            .take(max)
            .count()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}
