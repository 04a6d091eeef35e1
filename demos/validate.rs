// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use url_anatomy::UrlMatcher;

pub fn main() {
    let matcher = UrlMatcher::new();

    println!("{}", matcher.is_match("https://www.example.com")); // should be true
    println!("{}", matcher.is_match("example.com")); // should be true
    println!("{}", matcher.is_match("ftp://example.com")); // should be false

    // explain a rejection
    if let Some(rejection) = matcher.diagnose("http://example.com/search?q=1") {
        println!("{}", rejection); // line 1, column 26: expected end of line
    }
}
