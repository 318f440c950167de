//! Injection-guarded SQL fragments

use std::fmt;

/// Statement terminator that must never appear inside an interpolated value.
const STATEMENT_TERMINATOR: char = ';';

/// Errors raised while constructing statement text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid SQL parameter '{fragment}': statement terminator is not allowed")]
    StatementTerminator { fragment: String },
}

/// Reject text containing a statement terminator.
pub fn check(text: &str) -> Result<(), ValidationError> {
    if text.contains(STATEMENT_TERMINATOR) {
        return Err(ValidationError::StatementTerminator {
            fragment: text.to_string(),
        });
    }
    Ok(())
}

/// Caller-supplied text proven free of statement terminators.
///
/// The only way to construct one is through [`SqlFragment::new`], so holding
/// a value is the guarantee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFragment(String);

impl SqlFragment {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        check(&text)?;
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SqlFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SqlFragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
