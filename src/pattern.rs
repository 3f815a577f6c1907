//! Sub-folder name patterns.
//!
//! A pattern is a regular expression with a named group `name`; the text it
//! captures from a file name becomes the sub-folder the file is moved into.
//! Matching is case-insensitive, `.` also matches newlines, and the match is
//! not anchored unless the pattern anchors itself.

use regex::{Regex, RegexBuilder};

use crate::errors::DispatchError;

/// Name of the capture group that yields the sub-folder name.
pub const REGEX_GROUP_NAME: &str = "name";

/// Token a pattern must contain to be accepted, e.g. `(?<name>\d+)`.
pub fn required_group_token() -> String {
    format!("?<{REGEX_GROUP_NAME}>")
}

/// Textual pre-check only; compilation happens in [`SubfolderPattern::compile`].
pub fn is_valid_pattern(text: &str) -> bool {
    text.contains(&required_group_token())
}

/// Result of matching one file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// The pattern did not match at all.
    NoMatch,
    /// Matched, but the `name` group is absent or captured nothing.
    MissingGroup,
    /// Captured sub-folder name (non-empty).
    Name(String),
}

/// A compiled sub-folder pattern.
#[derive(Debug, Clone)]
pub struct SubfolderPattern {
    source: String,
    regex: Regex,
}

impl SubfolderPattern {
    /// Check for the group token, then compile with dispatch matching options.
    pub fn compile(pattern: &str) -> Result<Self, DispatchError> {
        if !is_valid_pattern(pattern) {
            return Err(DispatchError::MissingGroup {
                pattern: pattern.to_string(),
                token: required_group_token(),
            });
        }
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| DispatchError::BadPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match `file_name` and extract the `name` group.
    pub fn capture(&self, file_name: &str) -> Capture {
        let Some(caps) = self.regex.captures(file_name) else {
            return Capture::NoMatch;
        };
        match caps.name(REGEX_GROUP_NAME).map(|m| m.as_str()) {
            Some(value) if !value.is_empty() => Capture::Name(value.to_string()),
            _ => Capture::MissingGroup,
        }
    }
}
