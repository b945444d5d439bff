//! Validation for values typed into prompts or passed as CLI arguments

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn snake_case_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(_[a-z0-9]+)*$").expect("valid snake_case regex"))
}

/// Check that a value is snake_case (lowercase words joined by single underscores)
pub fn is_snake_case(value: &str) -> bool {
    snake_case_regex().is_match(value)
}

/// Reject values shorter than `min_length` after trimming
pub fn validate_not_empty(value: &str, min_length: usize) -> Result<()> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(Error::validation("Input cannot be empty"));
    }
    if len < min_length {
        return Err(Error::validation(format!(
            "Input must be at least {} characters long",
            min_length
        )));
    }
    Ok(())
}

/// Reject values that are not snake_case
pub fn validate_snake_case(value: &str) -> Result<()> {
    if is_snake_case(value) {
        Ok(())
    } else {
        Err(Error::validation("Input must be in snake_case"))
    }
}

/// Where generated code is inserted into an existing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionPoint {
    Begin,
    End,
}

impl InsertionPoint {
    pub const ALL: [InsertionPoint; 2] = [InsertionPoint::Begin, InsertionPoint::End];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::End => "end",
        }
    }
}

impl fmt::Display for InsertionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsertionPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                let valid = Self::ALL.map(|p| p.as_str()).join(",");
                Error::validation(format!("Position must be one of {}.", valid))
            })
    }
}

/// Parse an optional `--position` argument
///
/// `None` defers the decision to the caller.
pub fn parse_insertion_point(position: Option<&str>) -> Result<Option<InsertionPoint>> {
    position.map(str::parse).transpose()
}
