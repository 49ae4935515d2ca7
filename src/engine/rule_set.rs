//! Active rule set.
//!
//! The catalog (`rules/`) lists every rule in precedence order. A `RuleSet` is
//! the configured subset of it that one detector walks on every pass.
//!
//! ## Invariants
//!
//! - Rules keep catalog order regardless of the order of the inclusion list.
//!   Order is precedence: block rules first, then inline rules with the
//!   longest markers first, so `**` is never swallowed by `*`.
//! - A `RuleSet` is never mutated after construction. Changing configuration
//!   means building a new one.
//!
//! ## Marker gating
//!
//! Each rule declares the marker characters its pattern needs (`MarkerMask`).
//! The trigger scan records which markers the inspected line contains, and
//! rules with none of their markers present are skipped without running the
//! regex. Skipping a rule that cannot match never changes which rule matches
//! first.

use crate::error::ConfigError;
use crate::Rule;
use regex::Regex;
use std::collections::HashSet;

bitflags::bitflags! {
    /// Markdown marker characters present in a line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MarkerMask: u16 {
        const HASH       = 1 << 0;
        const GT         = 1 << 1;
        const BACKTICK   = 1 << 2;
        const STAR       = 1 << 3;
        const UNDERSCORE = 1 << 4;
        const TILDE      = 1 << 5;
        const DASH       = 1 << 6;
        const PLUS       = 1 << 7;
        const BRACKET    = 1 << 8;
        const BANG       = 1 << 9;
    }
}

impl MarkerMask {
    /// Markers present in `text`.
    pub fn scan(text: &str) -> Self {
        let mut mask = MarkerMask::empty();
        for b in text.bytes() {
            mask |= match b {
                b'#' => MarkerMask::HASH,
                b'>' => MarkerMask::GT,
                b'`' => MarkerMask::BACKTICK,
                b'*' => MarkerMask::STAR,
                b'_' => MarkerMask::UNDERSCORE,
                b'~' => MarkerMask::TILDE,
                b'-' => MarkerMask::DASH,
                b'+' => MarkerMask::PLUS,
                b'[' => MarkerMask::BRACKET,
                b'!' => MarkerMask::BANG,
                _ => continue,
            };
        }
        mask
    }
}

/// Ordered, immutable set of active rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Every catalog rule, in catalog order.
    pub(crate) fn full(catalog: &[Rule]) -> Self {
        RuleSet { rules: catalog.to_vec() }
    }

    /// Filter `catalog` by `include` (`None` keeps everything) and apply the
    /// header pattern override.
    pub(crate) fn build(
        catalog: &[Rule],
        include: Option<&[String]>,
        header_pattern: Option<&Regex>,
    ) -> Result<Self, ConfigError> {
        let mut rules = match include {
            None => catalog.to_vec(),
            Some(names) => {
                if names.is_empty() {
                    return Err(ConfigError::EmptyFormatList);
                }

                let mut wanted: HashSet<&str> = HashSet::with_capacity(names.len());
                for name in names {
                    if !catalog.iter().any(|r| r.name == name.as_str()) {
                        return Err(ConfigError::UnknownFormat(name.clone()));
                    }
                    if !wanted.insert(name.as_str()) {
                        return Err(ConfigError::DuplicateFormat(name.clone()));
                    }
                }

                catalog.iter().filter(|r| wanted.contains(r.name)).cloned().collect()
            }
        };

        if let Some(pattern) = header_pattern {
            for rule in rules.iter_mut().filter(|r| r.name == "header") {
                *rule = rule.with_pattern(pattern.clone());
            }
        }

        Ok(RuleSet { rules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn scan_collects_markers() {
        let mask = MarkerMask::scan("**a** [b](c) ~");
        assert!(mask.contains(MarkerMask::STAR | MarkerMask::BRACKET | MarkerMask::TILDE));
        assert!(!mask.intersects(MarkerMask::HASH | MarkerMask::BANG));
        assert!(MarkerMask::scan("plain words").is_empty());
    }

    #[test]
    fn include_list_keeps_catalog_order() {
        let catalog = rules::catalog();
        let set = RuleSet::build(&catalog, Some(&names(&["link", "bold", "header"])), None).unwrap();
        assert_eq!(set.names(), vec!["header", "bold", "link"]);
    }

    #[test]
    fn unknown_and_duplicate_names_are_rejected() {
        let catalog = rules::catalog();

        let err = RuleSet::build(&catalog, Some(&names(&["bold", "underline"])), None).unwrap_err();
        assert_eq!(err, ConfigError::UnknownFormat("underline".to_string()));

        let err = RuleSet::build(&catalog, Some(&names(&["bold", "bold"])), None).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateFormat("bold".to_string()));

        let err = RuleSet::build(&catalog, Some(&[]), None).unwrap_err();
        assert_eq!(err, ConfigError::EmptyFormatList);
    }

    #[test]
    fn header_override_replaces_pattern_and_drops_gating() {
        let catalog = rules::catalog();
        let custom = Regex::new(r"^#{1,3}\s").unwrap();
        let set = RuleSet::build(&catalog, None, Some(&custom)).unwrap();

        let header = set.get("header").unwrap();
        assert_eq!(header.pattern().as_str(), r"^#{1,3}\s");
        assert!(header.markers.is_empty());
        assert_eq!(set.len(), catalog.len());
    }
}
