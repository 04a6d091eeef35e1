// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Location {
    pub index: usize,  // The byte index in the line
    pub line: usize,   // The line number (0-based index)
    pub column: usize, // The column number in characters (0-based index)
}

impl Location {
    /// Create a new `Location` representing a single position.
    pub fn new_position(index: usize, line: usize, column: usize) -> Self {
        Self {
            index,
            line,
            column,
        }
    }

    /// Create a position `Location` from a byte index into a single line of text.
    ///
    /// The column counts characters, not bytes, so that a caret can be
    /// placed under the offending character.
    pub fn from_byte_index(text: &str, index: usize, line: usize) -> Self {
        let column = match text.get(..index) {
            Some(s) => s.chars().count(),
            None => text.chars().count(),
        };
        Self::new_position(index, line, column)
    }

    /// Move the location to another line, keeping the index and column.
    pub fn with_line(&self, line: usize) -> Self {
        Self { line, ..*self }
    }
}
