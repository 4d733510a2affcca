//! Path templates compiled to anchored regular expressions.
//!
//! A template is any [`regex`] pattern. Named groups (`(?P<id>[0-9]+)` or
//! `(?<id>[0-9]+)`) become path parameters; unnamed groups are ignored.
//! The template always has to match the whole path: `/item` never matches
//! `/item/extra`.

use std::collections::HashMap;

use regex::Regex;

use crate::error::Error;

/// A compiled path template.
#[derive(Clone, Debug)]
pub struct Pattern {
    template: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `template`, anchored at both ends.
    ///
    /// The template is wrapped in a non-capturing group before anchoring so
    /// top-level alternations (`/a|/b`) are anchored as a whole.
    pub fn compile(template: &str) -> Result<Self, Error> {
        let regex = Regex::new(&format!("^(?:{template})$")).map_err(|source| {
            Error::InvalidPattern { pattern: template.to_owned(), source }
        })?;
        Ok(Self { template: template.to_owned(), regex })
    }

    /// The template as registered, without the added anchors.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Matches `path` and returns its named captures.
    ///
    /// Returns `None` when the path does not match. Named groups that did not
    /// take part in the match (e.g. inside an unused optional branch) have no
    /// entry.
    pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.regex.captures(path)?;
        let params = self.regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                caps.name(name).map(|m| (name.to_owned(), m.as_str().to_owned()))
            })
            .collect();
        Some(params)
    }
}
