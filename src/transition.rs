// Copyright (c) 2024 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE, LICENSE.additional and CONTRIBUTING.

use std::fmt::Display;

#[derive(Debug)]
pub enum Transition {
    Char(CharTransition),
    String(StringTransition),
    CharSet(CharSetTransition),
    Assertion(AssertionTransition),
}

#[derive(Debug)]
pub struct CharTransition {
    pub byte: u8,
    pub repetition_type: RepetitionType,
}

// Alternatives are tried in order, then "absent" if `optional` is set.
#[derive(Debug)]
pub struct StringTransition {
    pub alternatives: Vec<String>,
    pub optional: bool,
}

#[derive(Debug)]
pub struct CharSetTransition {
    pub charset: CharSet,
    pub repetition_type: RepetitionType,
}

#[derive(Debug)]
pub struct AssertionTransition {
    pub name: AssertionName,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AssertionName {
    End,
}

#[derive(Debug, PartialEq, Clone)]
pub struct CharSet {
    pub items: Vec<CharSetItem>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum CharSetItem {
    Char(u32),
    Range(CharRange),
}

#[derive(Debug, PartialEq, Clone)]
pub struct CharRange {
    pub start: u32,
    pub end_included: u32,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RepetitionType {
    Specified(usize),
    Range(usize, usize),
}

impl RepetitionType {
    pub fn min(&self) -> usize {
        match self {
            RepetitionType::Specified(n) => *n,
            RepetitionType::Range(m, _) => *m,
        }
    }

    pub fn max(&self) -> usize {
        match self {
            RepetitionType::Specified(n) => *n,
            RepetitionType::Range(_, n) => *n,
        }
    }
}

impl CharTransition {
    pub fn new(c: char, repetition_type: RepetitionType) -> Self {
        debug_assert!(c.is_ascii());
        CharTransition {
            byte: c as u8,
            repetition_type,
        }
    }
}

impl StringTransition {
    pub fn new(alternatives: &[&str], optional: bool) -> Self {
        StringTransition {
            alternatives: alternatives.iter().map(|s| (*s).to_owned()).collect(),
            optional,
        }
    }
}

impl CharSetTransition {
    pub fn new(charset: CharSet, repetition_type: RepetitionType) -> Self {
        CharSetTransition {
            charset,
            repetition_type,
        }
    }
}

impl AssertionTransition {
    pub fn new(name: AssertionName) -> Self {
        AssertionTransition { name }
    }
}

impl CharSetItem {
    pub fn new_char(character: char) -> Self {
        CharSetItem::Char(character as u32)
    }

    pub fn new_range(start: char, end_included: char) -> Self {
        let char_range = CharRange {
            start: start as u32,
            end_included: end_included as u32,
        };
        CharSetItem::Range(char_range)
    }
}

impl CharSet {
    pub fn new(items: Vec<CharSetItem>) -> Self {
        CharSet { items }
    }

    /// Test a single byte of the input against this set.
    ///
    /// The input is scanned byte by byte, each byte of a multi-byte UTF-8
    /// sequence is >= 0x80 and never matches an ASCII item.
    pub fn matches(&self, byte: u8) -> bool {
        let current_char = byte as u32;
        self.items.iter().any(|item| match item {
            CharSetItem::Char(c) => current_char == *c,
            CharSetItem::Range(r) => current_char >= r.start && current_char <= r.end_included,
        })
    }
}

pub fn add_char(items: &mut Vec<CharSetItem>, c: char) {
    items.push(CharSetItem::new_char(c));
}

pub fn add_range(items: &mut Vec<CharSetItem>, start: char, end_included: char) {
    items.push(CharSetItem::new_range(start, end_included));
}

pub fn add_preset_word(items: &mut Vec<CharSetItem>) {
    // https://developer.mozilla.org/en-US/docs/Web/JavaScript/Guide/Regular_expressions/Character_classes
    // [A-Za-z0-9_]
    add_range(items, 'A', 'Z');
    add_range(items, 'a', 'z');
    add_range(items, '0', '9');
    add_char(items, '_');
}

pub fn add_preset_digit(items: &mut Vec<CharSetItem>) {
    // [0-9]
    add_range(items, '0', '9');
}

impl Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Char(c) => write!(f, "{}", c),
            Transition::String(s) => write!(f, "{}", s),
            Transition::CharSet(c) => write!(f, "{}", c),
            Transition::Assertion(a) => write!(f, "{}", a),
        }
    }
}

impl Display for CharTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.repetition_type {
            RepetitionType::Specified(1) => write!(f, "Char '{}'", self.byte as char),
            _ => write!(
                f,
                "Char '{}', repetition {}",
                self.byte as char, self.repetition_type
            ),
        }
    }
}

impl Display for StringTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = self
            .alternatives
            .iter()
            .map(|s| format!("String \"{}\"", s))
            .collect();

        if self.optional {
            parts.push("(absent)".to_owned());
        }

        f.write_str(&parts.join(" || "))
    }
}

impl Display for CharSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lines = vec![];
        for item in &self.items {
            let line = match item {
                CharSetItem::Char(codepoint) => {
                    let c = char::from_u32(*codepoint).unwrap_or(char::REPLACEMENT_CHARACTER);
                    match c {
                        '\t' => "'\\t'".to_owned(),
                        '\r' => "'\\r'".to_owned(),
                        '\n' => "'\\n'".to_owned(),
                        _ => format!("'{}'", c),
                    }
                }
                CharSetItem::Range(r) => {
                    let start = char::from_u32(r.start).unwrap_or(char::REPLACEMENT_CHARACTER);
                    let end_included =
                        char::from_u32(r.end_included).unwrap_or(char::REPLACEMENT_CHARACTER);
                    format!("'{}'..'{}'", start, end_included)
                }
            };
            lines.push(line);
        }

        write!(f, "Charset [{}]", lines.join(", "))
    }
}

impl Display for CharSetTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, repetition {}", self.charset, self.repetition_type)
    }
}

impl Display for AssertionTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Assertion \"{}\"", self.name)
    }
}

impl Display for AssertionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssertionName::End => f.write_str("end"),
        }
    }
}

impl Display for RepetitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepetitionType::Specified(n) => write!(f, "times {}", n),
            RepetitionType::Range(m, n) => {
                if n == &usize::MAX {
                    write!(f, "from {} to MAX", m)
                } else {
                    write!(f, "from {} to {}", m, n)
                }
            }
        }
    }
}
