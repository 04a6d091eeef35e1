// Copyright (c) 2024 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE, LICENSE.additional and CONTRIBUTING.

use std::fmt::Display;

use crate::transition::{
    add_char, add_preset_digit, add_preset_word, add_range, AssertionName, AssertionTransition,
    CharSet, CharSetTransition, CharTransition, RepetitionType, StringTransition, Transition,
};

/// The documented expression in traditional notation.
///
/// It is shown to users for reference only, the matcher never parses it,
/// the equivalent grammar is built by `Route::url`.
pub const PATTERN: &str = r"^(https?:\/\/)?([\da-z\.-]+)\.([a-z\.]{2,6})([\/\w \.-]*)*\/?$";

pub const CAPTURE_GROUP_NAMES: [Option<&str>; 5] = [
    None,
    Some("scheme"),
    Some("domain"),
    Some("tld"),
    Some("suffix"),
];

pub const SCHEME_GROUP_INDEX: usize = 1;
pub const DOMAIN_GROUP_INDEX: usize = 2;
pub const TLD_GROUP_INDEX: usize = 3;
pub const SUFFIX_GROUP_INDEX: usize = 4;

// The separator that follows the scheme token, e.g. "https" + "://".
pub const SCHEME_SEPARATOR: &str = "://";

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum StageName {
    Scheme,
    Domain,
    Separator,
    TopLevelDomain,
    Suffix,
    TrailingSlash,
    End,
}

#[derive(Debug)]
pub struct StageItem {
    pub name: StageName,
    pub transition: Transition,
}

/// The seven ordered stages of the URL grammar.
///
/// ```diagram
///  scheme?  domain+   '.'   tld{2,6}   suffix*   '/'?   end
/// o-------o--------o------o----------o---------o------o-----o
/// ```
///
/// Each stage only starts where the previous one stopped, there is no
/// alternation between stages, and only the quantified stages can give
/// characters back when a later stage fails.
#[derive(Debug)]
pub struct Route {
    pub stages: Vec<StageItem>,
}

impl Route {
    pub fn url() -> Self {
        // (https?:\/\/)?
        //
        // the greedy "s?" tries "https://" before "http://".
        let scheme = StringTransition::new(&["https://", "http://"], true);

        // [\da-z\.-]+
        let mut domain_items = vec![];
        add_preset_digit(&mut domain_items);
        add_range(&mut domain_items, 'a', 'z');
        add_char(&mut domain_items, '.');
        add_char(&mut domain_items, '-');
        let domain = CharSetTransition::new(
            CharSet::new(domain_items),
            RepetitionType::Range(1, usize::MAX),
        );

        // \.
        let separator = CharTransition::new('.', RepetitionType::Specified(1));

        // [a-z\.]{2,6}
        let mut tld_items = vec![];
        add_range(&mut tld_items, 'a', 'z');
        add_char(&mut tld_items, '.');
        let tld = CharSetTransition::new(CharSet::new(tld_items), RepetitionType::Range(2, 6));

        // ([\/\w \.-]*)*
        //
        // the outer quantifier adds nothing to the inner one,
        // so the two are collapsed into a single "zero or more".
        let mut suffix_items = vec![];
        add_char(&mut suffix_items, '/');
        add_preset_word(&mut suffix_items);
        add_char(&mut suffix_items, ' ');
        add_char(&mut suffix_items, '.');
        add_char(&mut suffix_items, '-');
        let suffix = CharSetTransition::new(
            CharSet::new(suffix_items),
            RepetitionType::Range(0, usize::MAX),
        );

        // \/?
        let trailing_slash = CharTransition::new('/', RepetitionType::Range(0, 1));

        // $
        let end = AssertionTransition::new(AssertionName::End);

        let stages = vec![
            StageItem::new(StageName::Scheme, Transition::String(scheme)),
            StageItem::new(StageName::Domain, Transition::CharSet(domain)),
            StageItem::new(StageName::Separator, Transition::Char(separator)),
            StageItem::new(StageName::TopLevelDomain, Transition::CharSet(tld)),
            StageItem::new(StageName::Suffix, Transition::CharSet(suffix)),
            StageItem::new(StageName::TrailingSlash, Transition::Char(trailing_slash)),
            StageItem::new(StageName::End, Transition::Assertion(end)),
        ];

        Route { stages }
    }

    pub fn get_stage(&self, name: StageName) -> &StageItem {
        // `Route::url` creates every stage exactly once and in the declaration order.
        &self.stages[name as usize]
    }

    pub fn scheme(&self) -> &StringTransition {
        match &self.get_stage(StageName::Scheme).transition {
            Transition::String(t) => t,
            _ => unreachable!(),
        }
    }

    pub fn domain(&self) -> &CharSetTransition {
        self.get_charset_transition(StageName::Domain)
    }

    pub fn separator(&self) -> &CharTransition {
        self.get_char_transition(StageName::Separator)
    }

    pub fn top_level_domain(&self) -> &CharSetTransition {
        self.get_charset_transition(StageName::TopLevelDomain)
    }

    pub fn suffix(&self) -> &CharSetTransition {
        self.get_charset_transition(StageName::Suffix)
    }

    pub fn trailing_slash(&self) -> &CharTransition {
        self.get_char_transition(StageName::TrailingSlash)
    }

    fn get_charset_transition(&self, name: StageName) -> &CharSetTransition {
        match &self.get_stage(name).transition {
            Transition::CharSet(t) => t,
            _ => unreachable!(),
        }
    }

    fn get_char_transition(&self, name: StageName) -> &CharTransition {
        match &self.get_stage(name).transition {
            Transition::Char(t) => t,
            _ => unreachable!(),
        }
    }

    pub fn get_capture_group_name_by_index(&self, index: usize) -> Option<&'static str> {
        CAPTURE_GROUP_NAMES.get(index).copied().flatten()
    }

    pub fn get_debug_text(&self) -> String {
        let mut lines = vec![];
        for (idx, stage) in self.stages.iter().enumerate() {
            lines.push(format!("- ${} {}", idx, stage.name));
            lines.push(format!("  -> {}", stage.transition));
        }
        lines.join("\n")
    }
}

pub fn get_capture_group_index_by_name(name: &str) -> Option<usize> {
    CAPTURE_GROUP_NAMES
        .iter()
        .position(|item| matches!(item, Some(s) if *s == name))
}

impl StageItem {
    pub fn new(name: StageName, transition: Transition) -> Self {
        StageItem { name, transition }
    }
}

impl Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageName::Scheme => f.write_str("scheme"),
            StageName::Domain => f.write_str("domain"),
            StageName::Separator => f.write_str("separator"),
            StageName::TopLevelDomain => f.write_str("top-level domain"),
            StageName::Suffix => f.write_str("suffix"),
            StageName::TrailingSlash => f.write_str("trailing slash"),
            StageName::End => f.write_str("end of line"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{get_capture_group_index_by_name, Route, StageName};

    #[test]
    fn test_stage_order() {
        let route = Route::url();
        let names: Vec<StageName> = route.stages.iter().map(|item| item.name).collect();
        assert_eq!(
            names,
            vec![
                StageName::Scheme,
                StageName::Domain,
                StageName::Separator,
                StageName::TopLevelDomain,
                StageName::Suffix,
                StageName::TrailingSlash,
                StageName::End,
            ]
        );

        for name in names {
            assert_eq!(route.get_stage(name).name, name);
        }
    }

    #[test]
    fn test_stage_charsets() {
        let route = Route::url();

        let domain = &route.domain().charset;
        for b in b"09az.-" {
            assert!(domain.matches(*b));
        }
        for b in b"AZ_/: " {
            assert!(!domain.matches(*b));
        }

        let tld = &route.top_level_domain().charset;
        for b in b"az." {
            assert!(tld.matches(*b));
        }
        for b in b"09A-" {
            assert!(!tld.matches(*b));
        }

        let suffix = &route.suffix().charset;
        for b in b"/azAZ09_ .-" {
            assert!(suffix.matches(*b));
        }
        for b in b"?=:#&%" {
            assert!(!suffix.matches(*b));
        }

        assert_eq!(route.top_level_domain().repetition_type.min(), 2);
        assert_eq!(route.top_level_domain().repetition_type.max(), 6);
        assert_eq!(route.separator().byte, b'.');
        assert_eq!(route.trailing_slash().byte, b'/');
        assert_eq!(route.scheme().alternatives, vec!["https://", "http://"]);
    }

    #[test]
    fn test_capture_group_names() {
        let route = Route::url();
        assert_eq!(route.get_capture_group_name_by_index(0), None);
        assert_eq!(route.get_capture_group_name_by_index(1), Some("scheme"));
        assert_eq!(route.get_capture_group_name_by_index(4), Some("suffix"));
        assert_eq!(route.get_capture_group_name_by_index(5), None);

        assert_eq!(get_capture_group_index_by_name("domain"), Some(2));
        assert_eq!(get_capture_group_index_by_name("tld"), Some(3));
        assert_eq!(get_capture_group_index_by_name("path"), None);
    }

    #[test]
    fn test_debug_text() {
        let route = Route::url();
        assert_eq!(
            route.get_debug_text(),
            "\
- $0 scheme
  -> String \"https://\" || String \"http://\" || (absent)
- $1 domain
  -> Charset ['0'..'9', 'a'..'z', '.', '-'], repetition from 1 to MAX
- $2 separator
  -> Char '.'
- $3 top-level domain
  -> Charset ['a'..'z', '.'], repetition from 2 to 6
- $4 suffix
  -> Charset ['/', 'A'..'Z', 'a'..'z', '0'..'9', '_', ' ', '.', '-'], repetition from 0 to MAX
- $5 trailing slash
  -> Char '/', repetition from 0 to 1
- $6 end of line
  -> Assertion \"end\""
        );
    }
}
