//! Parsed Boolean function definitions.
//!
//! An [`Expression`] is the result of parsing `name = rhs`: the function name,
//! the right-hand side as a token sequence, and the [`LiteralSet`] of variables
//! used on the right-hand side. The literal set fixes the position of every
//! variable in the minterm vectors built from the expression.
//!
//! Grammar of the right-hand side (after [`normalize`] and the postfix rewrite):
//!
//! ```text
//! term_expr := and_term ("|" and_term)*
//! and_term  := factor ("&"? factor)*
//! factor    := "~"* IDENT
//! ```
//!
//! The optional `&` accepts juxtaposed factors such as `~x~y`, which is what
//! `x'y'` turns into once postfix negations are moved to the front. Only a `'`
//! ends a name this way: `x'yz` has the factors `~x` and `yz`. The parsed
//! expression always spells the AND out, so its [`Display`][fmt::Display] form
//! parses back to the same expression.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use log::debug;

use crate::error::Error;
use crate::token::{concat, normalize, tokenize, Operator, Token};

/// Ordered set of distinct variable names, in first-seen order.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct LiteralSet {
    names: Vec<String>,
}

impl LiteralSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the distinct variable names of `tokens`, in the order they first appear.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        tokens.iter().filter(|t| t.is_variable()).map(Token::text).collect()
    }

    /// Adds `name` unless it is already present. Returns its position.
    pub fn insert(&mut self, name: &str) -> usize {
        match self.index_of(name) {
            Some(index) => index,
            None => {
                self.names.push(name.to_string());
                self.names.len() - 1
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Like [`index_of`][Self::index_of], but a missing name is an [`Error::UnknownLiteral`].
    pub fn position(&self, name: &str) -> Result<usize, Error> {
        self.index_of(name).ok_or_else(|| Error::UnknownLiteral(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for LiteralSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = LiteralSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl Index<usize> for LiteralSet {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        &self.names[index]
    }
}

impl fmt::Display for LiteralSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}

/// A parsed function definition `name = terms`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Expression {
    name: String,
    literals: LiteralSet,
    terms: Vec<Token>,
}

impl Expression {
    /// Parses a function definition such as `f = a & ~b | c`.
    ///
    /// The text is normalized first, so whitespace and the `*`, `+`, `!`, `'`
    /// operator spellings are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use shannon_mux::expr::Expression;
    ///
    /// let expr = Expression::parse("f = ~a*~b + a*b").unwrap();
    /// assert_eq!(expr.name(), "f");
    /// assert_eq!(expr.literals().iter().collect::<Vec<_>>(), ["a", "b"]);
    /// assert_eq!(expr.to_string(), "f=~a&~b|a&b");
    /// ```
    pub fn parse(text: &str) -> Result<Self, Error> {
        let normalized = normalize(text);
        let tokens = tokenize(&normalized)?;
        Self::from_tokens(tokens)
    }

    /// Builds an expression from an already tokenized definition.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Result<Self, Error> {
        let assigns: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.as_operator() == Some(Operator::Assign))
            .map(|(i, _)| i)
            .collect();
        let split = match assigns.as_slice() {
            [] => return Err(Error::malformed("missing '='")),
            [i] => *i,
            _ => return Err(Error::malformed(format!("'=' appears {} times", assigns.len()))),
        };

        let terms = tokens.split_off(split + 1);
        tokens.truncate(split);
        let name = match tokens.as_slice() {
            [token] if token.is_variable() => token.text().to_string(),
            _ => {
                return Err(Error::malformed(format!(
                    "left-hand side must be a single variable, got {:?}",
                    concat(&tokens)
                )))
            }
        };

        let terms = canonical_terms(terms)?;
        let literals = LiteralSet::from_tokens(&terms);
        debug!("parse: name = {}, literals = {}, {} rhs tokens", name, literals, terms.len());

        Ok(Expression { name, literals, terms })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn literals(&self) -> &LiteralSet {
        &self.literals
    }

    /// Right-hand side tokens.
    pub fn terms(&self) -> &[Token] {
        &self.terms
    }
}

/// Checks the right-hand side against the `term_expr` grammar and makes every
/// implicit AND between juxtaposed factors an explicit `&` token.
fn canonical_terms(terms: Vec<Token>) -> Result<Vec<Token>, Error> {
    if terms.is_empty() {
        return Err(Error::malformed("right-hand side is empty"));
    }

    let mut output = Vec::with_capacity(terms.len());
    let mut expect_factor = true;
    for (i, token) in terms.into_iter().enumerate() {
        match token.as_operator() {
            None | Some(Operator::Not) => {
                if !expect_factor {
                    output.push(Token::operator(Operator::And));
                }
                expect_factor = !token.is_variable();
            }
            Some(op @ (Operator::And | Operator::Or)) => {
                if expect_factor {
                    return Err(Error::malformed(format!(
                        "missing operand before '{}' at position {}",
                        op.as_char(),
                        i
                    )));
                }
                expect_factor = true;
            }
            Some(op @ (Operator::Assign | Operator::PostfixNot)) => {
                return Err(Error::malformed(format!("unexpected '{}' at position {}", op.as_char(), i)));
            }
        }
        output.push(token);
    }

    if expect_factor {
        let last = output.last().map(Token::text).unwrap_or_default();
        return Err(Error::malformed(format!("dangling operator '{}' at the end", last)));
    }
    Ok(output)
}

impl FromStr for Expression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, concat(&self.terms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn names(literals: &LiteralSet) -> Vec<&str> {
        literals.iter().collect()
    }

    fn assert_malformed(text: &str) {
        match Expression::parse(text) {
            Err(Error::MalformedExpression(msg)) => println!("{:?} -> {}", text, msg),
            other => panic!("expected malformed expression for {:?}, got {:?}", text, other),
        }
    }

    #[test]
    fn test_parse_name_and_terms() {
        let expr = Expression::parse("f = a & ~b | c").unwrap();
        assert_eq!(expr.name(), "f");
        assert_eq!(concat(expr.terms()), "a&~b|c");
        assert_eq!(expr.to_string(), "f=a&~b|c");
    }

    #[test]
    fn test_literal_order() {
        let expr = Expression::parse("f=~a&~b|a&b").unwrap();
        assert_eq!(names(expr.literals()), ["a", "b"]);

        let expr = Expression::parse("g=c&b|a&c|b").unwrap();
        assert_eq!(names(expr.literals()), ["c", "b", "a"]);
        assert_eq!(expr.literals().len(), 3);
    }

    #[test]
    fn test_literal_set_excludes_lhs() {
        let expr = Expression::parse("f=a|b").unwrap();
        assert_eq!(expr.literals().index_of("f"), None);
        assert_eq!(expr.literals().position("f"), Err(Error::UnknownLiteral("f".to_string())));
        assert_eq!(expr.literals().position("b"), Ok(1));
        assert_eq!(&expr.literals()[0], "a");
    }

    #[test]
    fn test_literal_set_from_iter_dedup() {
        let literals: LiteralSet = ["b", "a", "b", "c", "a"].into_iter().collect();
        assert_eq!(names(&literals), ["b", "a", "c"]);
        assert_eq!(literals.to_string(), "[b, a, c]");
    }

    #[test]
    fn test_parse_aliases() {
        let expr = Expression::parse("f = ~a * ~b * ~c + a * b' + !d").unwrap();
        assert_eq!(expr.to_string(), "f=~a&~b&~c|a&~b|~d");
        assert_eq!(names(expr.literals()), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_parse_juxtaposed_factors() {
        let expr = Expression::parse("f = x'y'z' + x'y'z").unwrap();
        assert_eq!(expr.to_string(), "f=~x&~y&~z|~x&~y&z");
        assert_eq!(names(expr.literals()), ["x", "y", "z"]);

        let again = Expression::parse(&expr.to_string()).unwrap();
        assert_eq!(again, expr);
    }

    #[test]
    fn test_parse_adjacent_names_are_one_literal() {
        let expr = Expression::parse("f = x'yz + xy'z'").unwrap();
        assert_eq!(names(expr.literals()), ["x", "yz", "xy", "z"]);
        assert_eq!(expr.to_string(), "f=~x&yz|~xy&~z");
    }

    #[test]
    fn test_parse_idempotent() {
        for text in [
            "f = ~a & ~b | a & b",
            "f = a * b' + a * c",
            "d4 = ~d0 & ~d1 & ~d2 | d0 & ~d1 & ~d2 | d0 & d1 & ~d2 | d0 & d1 & d2 | d3",
            "out = ~~sel & in0 | sel & in1",
            "f = x'y'z + x&y'",
        ] {
            let expr = Expression::parse(text).unwrap();
            let again: Expression = expr.to_string().parse().unwrap();
            assert_eq!(again, expr);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_malformed("");
        assert_malformed("   ");
        assert_malformed("a & b");
        assert_malformed("f = a = b");
        assert_malformed("f == a");
        assert_malformed("f & g = a");
        assert_malformed("~f = a");
        assert_malformed("= a");
        assert_malformed("f =");
        assert_malformed("f = a &");
        assert_malformed("f = a | ");
        assert_malformed("f = a || b");
        assert_malformed("f = | a");
        assert_malformed("f = a & | b");
        assert_malformed("f = ~");
        assert_malformed("f = a | ~");
        assert_malformed("f = 'a");
    }
}
