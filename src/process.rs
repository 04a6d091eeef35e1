// Copyright (c) 2024 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE, LICENSE.additional and CONTRIBUTING.

use crate::{
    context::Context,
    route::{
        Route, StageName, CAPTURE_GROUP_NAMES, DOMAIN_GROUP_INDEX, SCHEME_GROUP_INDEX,
        SCHEME_SEPARATOR, SUFFIX_GROUP_INDEX, TLD_GROUP_INDEX,
    },
};

#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct MatchRange {
    pub start: usize, // position included
    pub end: usize,   // position excluded
}

pub type MatchRanges = [Option<MatchRange>; CAPTURE_GROUP_NAMES.len()];

/// The stage that gave up at the furthest position reached by any attempt.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Failure {
    pub stage: StageName,
    pub position: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize) -> Self {
        MatchRange { start, end }
    }
}

/// Evaluate the whole line against the route.
///
/// The result is the same as a backtracking regex engine would produce:
/// every quantified stage consumes as much as it can, and when a later stage
/// fails the closest quantified stage gives back one character at a time.
/// Because the domain and the top-level domain stages are only separated by
/// a single literal, and the remaining stages are checked with the
/// precomputed tables of `Context`, each domain length costs at most
/// `tld_max - tld_min + 1` constant time checks, and the whole evaluation
/// is linear in the length of the line.
pub fn start_process(context: &Context, route: &Route) -> Result<MatchRanges, Failure> {
    let mut progress = Progress::default();

    match process_line(context, route, &mut progress) {
        Some(match_ranges) => Ok(match_ranges),
        // there is always the "no scheme" candidate, which records at least one failure.
        None => Err(progress.furthest.unwrap_or(Failure {
            stage: StageName::Domain,
            position: 0,
        })),
    }
}

// The bookkeeping of one evaluation.
#[derive(Debug, Default)]
struct Progress {
    // the failure at the furthest position so far
    furthest: Option<Failure>,

    // bytes scanned by the domain stage plus the lengths tried by the
    // domain and the top-level domain stages
    steps: usize,
}

fn process_line(context: &Context, route: &Route, progress: &mut Progress) -> Option<MatchRanges> {
    for (scheme_range, start) in scheme_candidates(context, route) {
        tracing::trace!(?scheme_range, start, "try scheme candidate");

        if let Some((domain_range, tld_range, suffix_range)) =
            process_after_scheme(context, route, start, progress)
        {
            tracing::trace!(steps = progress.steps, "matched");

            let mut match_ranges: MatchRanges = [None; CAPTURE_GROUP_NAMES.len()];
            match_ranges[0] = Some(MatchRange::new(0, context.len()));
            match_ranges[SCHEME_GROUP_INDEX] = scheme_range;
            match_ranges[DOMAIN_GROUP_INDEX] = Some(domain_range);
            match_ranges[TLD_GROUP_INDEX] = Some(tld_range);
            match_ranges[SUFFIX_GROUP_INDEX] = Some(suffix_range);
            return Some(match_ranges);
        }
    }

    tracing::trace!(steps = progress.steps, "no match");
    None
}

// Returns the scheme alternatives present at the start of the line, in
// greedy order, as pairs of (scheme token range, position after the scheme).
fn scheme_candidates(context: &Context, route: &Route) -> Vec<(Option<MatchRange>, usize)> {
    let scheme = route.scheme();
    let mut candidates = vec![];

    for alternative in &scheme.alternatives {
        if context.bytes.starts_with(alternative.as_bytes()) {
            let token_length = alternative.len() - SCHEME_SEPARATOR.len();
            candidates.push((Some(MatchRange::new(0, token_length)), alternative.len()));
        }
    }

    if scheme.optional {
        candidates.push((None, 0));
    }

    candidates
}

// Match "domain '.' tld suffix '/'? end" starting at `start`,
// returns the ranges of the domain, the top-level domain and the suffix.
fn process_after_scheme(
    context: &Context,
    route: &Route,
    start: usize,
    progress: &mut Progress,
) -> Option<(MatchRange, MatchRange, MatchRange)> {
    let bytes = context.bytes;
    let length = context.len();

    let domain_min = route.domain().repetition_type.min();
    let domain_run = context.domain_run(route, start);
    progress.steps += domain_run;

    if domain_run < domain_min {
        record_failure(progress, StageName::Domain, start);
        return None;
    }

    let separator = route.separator().byte;
    let tld_repetition = route.top_level_domain().repetition_type;
    let trailing_slash = route.trailing_slash();

    let mut separator_found = false;

    // the domain gives back characters from its longest run.
    for domain_length in (domain_min..=domain_run).rev() {
        progress.steps += 1;

        let separator_position = start + domain_length;
        if separator_position >= length || bytes[separator_position] != separator {
            continue;
        }

        separator_found = true;

        let tld_start = separator_position + 1;
        let tld_run = context.tld_runs[tld_start];

        tracing::trace!(domain_length, tld_start, tld_run, "try separator");

        if tld_run < tld_repetition.min() {
            record_failure(progress, StageName::TopLevelDomain, tld_start + tld_run);
            continue;
        }

        for tld_length in (tld_repetition.min()..=tld_run).rev() {
            progress.steps += 1;

            let suffix_start = tld_start + tld_length;
            let suffix_end = context.suffix_stops[suffix_start];

            let mut end = suffix_end;
            if trailing_slash.repetition_type.max() > 0
                && end < length
                && bytes[end] == trailing_slash.byte
            {
                end += 1;
            }

            if end == length {
                return Some((
                    MatchRange::new(start, separator_position),
                    MatchRange::new(tld_start, suffix_start),
                    MatchRange::new(suffix_start, suffix_end),
                ));
            }

            record_failure(progress, StageName::End, end);
        }
    }

    if !separator_found {
        record_failure(progress, StageName::Separator, start + domain_run);
    }

    None
}

fn record_failure(progress: &mut Progress, stage: StageName, position: usize) {
    tracing::trace!(%stage, position, "stage failed");

    match progress.furthest {
        Some(failure) if failure.position >= position => {}
        _ => {
            progress.furthest = Some(Failure { stage, position });
        }
    }
}
