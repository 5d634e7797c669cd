//! Glob patterns over ARN strings.
//!
//! `*` matches any run of characters (including none), `?` matches exactly
//! one character, and everything else is literal. Patterns are anchored at
//! both ends.

use std::fmt::{Display, Formatter, Result as FmtResult};

use regex::Regex;

use crate::error::ComposerError;

/// A glob pattern compiled once into a [`Regex`].
#[derive(Debug, Clone)]
pub struct ArnPattern {
    source: String,
    regex: Regex,
}

impl ArnPattern {
    pub fn new(pattern: impl Into<String>) -> Result<Self, ComposerError> {
        let source = pattern.into();
        let regex = Regex::new(&glob_to_regex(&source))?;
        Ok(Self { source, regex })
    }

    pub fn is_match(&self, arn: &str) -> bool {
        self.regex.is_match(arn)
    }

    /// The glob as it was given.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Display for ArnPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.source)
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("(?s)^");
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    out.push('$');
    out
}
