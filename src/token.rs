//! Tokenizer for flat Boolean function definitions.
//!
//! The input language is a single assignment `name = sum-of-products` over
//! named variables, e.g. `f = ~a & b | c`. Before tokenizing, [`normalize`] strips
//! whitespace and rewrites the alternative operator spellings:
//!
//! | Alias | Canonical | Meaning        |
//! |-------|-----------|----------------|
//! | `*`   | `&`       | AND            |
//! | `+`   | `\|`      | OR             |
//! | `!`   | `~`       | NOT (prefix)   |
//! | `'`   | `~`       | NOT (postfix)  |
//!
//! Postfix negation cannot be rewritten character-wise, so `'` survives
//! normalization and is turned into a prefix `~` by [`tokenize`] once the
//! variable it belongs to is known.
//!
//! # Example
//!
//! ```
//! use shannon_mux::token::{normalize, tokenize, TokenKind};
//!
//! let input = normalize("f = a * b' + c");
//! assert_eq!(input, "f=a&b'|c");
//!
//! let tokens = tokenize(&input).unwrap();
//! let text: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
//! assert_eq!(text, ["f", "=", "a", "&", "~", "b", "|", "c"]);
//! assert_eq!(tokens[0].kind(), TokenKind::Variable);
//! assert_eq!(tokens[1].kind(), TokenKind::Operator);
//! ```

use std::fmt;

use log::debug;

use crate::error::Error;

/// Kind of a [`Token`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    Variable,
    Operator,
}

/// Operators recognized by the tokenizer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    /// `&`
    And,
    /// `|`
    Or,
    /// `~`, prefix negation.
    Not,
    /// `=`, separates the function name from its definition.
    Assign,
    /// `'`, postfix negation. Only exists until the postfix rewrite in [`tokenize`].
    PostfixNot,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '&' => Some(Operator::And),
            '|' => Some(Operator::Or),
            '~' => Some(Operator::Not),
            '=' => Some(Operator::Assign),
            '\'' => Some(Operator::PostfixNot),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Operator::And => '&',
            Operator::Or => '|',
            Operator::Not => '~',
            Operator::Assign => '=',
            Operator::PostfixNot => '\'',
        }
    }
}

/// A single variable name or operator.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    text: String,
    kind: TokenKind,
}

impl Token {
    pub fn variable(name: impl Into<String>) -> Self {
        Token {
            text: name.into(),
            kind: TokenKind::Variable,
        }
    }

    pub fn operator(op: Operator) -> Self {
        Token {
            text: op.as_char().to_string(),
            kind: TokenKind::Operator,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn is_variable(&self) -> bool {
        self.kind == TokenKind::Variable
    }

    /// Returns the operator this token stands for, or `None` for variables.
    pub fn as_operator(&self) -> Option<Operator> {
        match self.kind {
            TokenKind::Variable => None,
            TokenKind::Operator => self.text.chars().next().and_then(Operator::from_char),
        }
    }

    fn is_postfix_not(&self) -> bool {
        self.as_operator() == Some(Operator::PostfixNot)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Strips whitespace and replaces operator aliases with their canonical form.
///
/// The postfix `'` is left in place, see the module documentation.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '*' => '&',
            '+' => '|',
            '!' => '~',
            c => c,
        })
        .collect()
}

/// Concatenates the text of `tokens`, in order.
pub fn concat(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text).collect()
}

/// Splits a normalized expression into variable and operator tokens.
///
/// Every operator character closes the literal accumulated so far; any other
/// character is part of a variable name, so names may span several characters
/// (`d0`, `sel`). Postfix negations are then moved in front of the variable
/// they follow: `a'` becomes `~ a`, `a''` becomes `~ ~ a`.
///
/// # Errors
///
/// [`Error::MalformedExpression`] if the input is empty, contains no variable
/// at all, or has a `'` that does not follow a variable.
pub fn tokenize(input: &str) -> Result<Vec<Token>, Error> {
    debug!("tokenize(input = {:?})", input);

    if input.is_empty() {
        return Err(Error::malformed("empty input"));
    }

    let mut tokens = Vec::new();
    let mut literal = String::new();
    for c in input.chars() {
        match Operator::from_char(c) {
            Some(op) => {
                if !literal.is_empty() {
                    tokens.push(Token::variable(std::mem::take(&mut literal)));
                }
                tokens.push(Token::operator(op));
            }
            None => literal.push(c),
        }
    }
    if !literal.is_empty() {
        tokens.push(Token::variable(literal));
    }

    if !tokens.iter().any(Token::is_variable) {
        return Err(Error::malformed(format!("no variables in {:?}", input)));
    }

    let tokens = rewrite_postfix_not(tokens)?;
    debug!("tokenize: {} tokens", tokens.len());
    Ok(tokens)
}

/// Rewrites every `x'` into `~x` in a single pass over `tokens`.
///
/// The run of `'` following a variable is consumed together with it, so each
/// input token is visited exactly once and nothing is inserted behind the cursor.
fn rewrite_postfix_not(tokens: Vec<Token>) -> Result<Vec<Token>, Error> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        match token.kind {
            TokenKind::Variable => {
                let mut negations = 0;
                while iter.next_if(Token::is_postfix_not).is_some() {
                    negations += 1;
                }
                output.extend(std::iter::repeat_with(|| Token::operator(Operator::Not)).take(negations));
                output.push(token);
            }
            TokenKind::Operator => {
                if token.is_postfix_not() {
                    return Err(Error::malformed("postfix negation must follow a variable"));
                }
                output.push(token);
            }
        }
    }

    Ok(output)
}
