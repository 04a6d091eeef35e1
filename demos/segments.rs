// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use url_anatomy::UrlMatcher;

pub fn main() {
    let matcher = UrlMatcher::new();
    let result = matcher.evaluate("http://www.example.co.uk/path/to file.html");

    if result.is_match() {
        println!("Found match: {}", &result[0]);
        println!("Scheme: {}", result.scheme().unwrap_or("(none)"));
        println!("Domain: {}", &result["domain"]);
        println!("TLD: {}", &result["tld"]);
        println!("Suffix: {}", &result["suffix"]);
    } else {
        println!("No match found");
    }
}
