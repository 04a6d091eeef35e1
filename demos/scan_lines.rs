// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use url_anatomy::UrlMatcher;

pub fn main() {
    let matcher = UrlMatcher::new();
    let text = "\
https://www.example.com
example.com
not a url
http://example.com/docs/
";

    println!("{}", matcher.pattern());

    for (line_index, result) in matcher.evaluate_lines(text) {
        match result.domain() {
            Some(domain) => println!(
                "{}: domain {}, tld {}",
                line_index + 1,
                domain,
                result.top_level_domain().unwrap_or_default()
            ),
            None => println!("{}: no match", line_index + 1),
        }
    }
}
