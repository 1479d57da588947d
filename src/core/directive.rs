//! Directives and the tag grammar that produces them.
//!
//! A field's tag text lists the validators to run, in order:
//!
//! ```text
//! not_empty,min:3,max:32
//! one_of:red|green|blue
//! ```
//!
//! Groups are separated by `,`; a validator name may be followed by `:` and
//! one or more options separated by `|`.

use crate::core::error::TagParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One validator invocation: a name plus its string options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Directive {
    /// Registry name of the validator
    pub name: String,
    /// Options in declared order
    pub options: Vec<String>,
}

impl Directive {
    /// Create a directive.
    pub fn new<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a directive without options.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.options.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.name, self.options.join("|"))
        }
    }
}

/// Parse tag text into directives.
///
/// Empty or blank text yields no directives. Any malformed group fails the
/// whole parse.
pub fn parse_tag(text: &str) -> Result<Vec<Directive>, TagParseError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .enumerate()
        .map(|(i, group)| parse_group(group, i + 1))
        .collect()
}

fn parse_group(group: &str, position: usize) -> Result<Directive, TagParseError> {
    let group = group.trim();
    if group.is_empty() {
        return Err(TagParseError::EmptyDirective { position });
    }

    let (name, options) = match group.split_once(':') {
        Some((name, options)) => (name.trim(), Some(options)),
        None => (group, None),
    };

    if name.is_empty() {
        return Err(TagParseError::EmptyName { position });
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(TagParseError::InvalidName {
            position,
            name: name.to_string(),
        });
    }

    let options = match options {
        None => Vec::new(),
        Some(raw) if raw.trim().is_empty() => {
            return Err(TagParseError::MissingOptions {
                position,
                name: name.to_string(),
            });
        }
        Some(raw) => raw.split('|').map(|o| o.trim().to_string()).collect(),
    };

    Ok(Directive {
        name: name.to_string(),
        options,
    })
}
