//! Error type shared by the parsing and decomposition pipeline.

use std::fmt;

/// Errors produced while turning an expression string into a decomposition.
///
/// Every failure is reported before any value is handed back to the caller,
/// so a failed parse never leaves a partially built [`Expression`][crate::expr::Expression] behind.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The input does not follow the `name = term | term ...` grammar:
    /// missing or repeated `=`, empty operand, dangling operator, empty input.
    MalformedExpression(String),
    /// A variable was looked up that is not part of the expression's literal set.
    ///
    /// Correct parsing never produces this, so seeing it means an internal inconsistency.
    UnknownLiteral(String),
}

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedExpression(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedExpression(msg) => write!(f, "Malformed expression: {}", msg),
            Error::UnknownLiteral(name) => write!(f, "Unknown literal: {}", name),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::malformed("missing '='");
        assert_eq!(err.to_string(), "Malformed expression: missing '='");

        let err = Error::UnknownLiteral("q".to_string());
        assert_eq!(err.to_string(), "Unknown literal: q");
    }
}
