//! Minterms (cubes) over an ordered literal set.
//!
//! A [`Minterm`] assigns one of `0`, `1` or `x` (don't-care) to every literal of an
//! expression, positionally following the expression's [`LiteralSet`]. A
//! [`MintermSet`] is a disjunction of such minterms, i.e. a sum-of-products cover
//! of a Boolean function.
//!
//! # Example
//!
//! ```
//! use shannon_mux::expr::Expression;
//! use shannon_mux::minterm::MintermSet;
//!
//! let expr = Expression::parse("f = a & ~b | ~a & b").unwrap();
//! let set = MintermSet::from_expression(&expr).unwrap();
//! let rows: Vec<String> = set.iter().map(|m| m.to_string()).collect();
//! assert_eq!(rows, ["10", "01"]);
//! assert_eq!(set.to_sop_string(expr.literals()), "a&~b | ~a&b");
//! ```

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::Error;
use crate::expr::{Expression, LiteralSet};
use crate::token::Operator;

/// Value of one literal position in a [`Minterm`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Value {
    Zero,
    One,
    DontCare,
}

impl Value {
    pub fn from_bool(value: bool) -> Self {
        if value {
            Value::One
        } else {
            Value::Zero
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Value::Zero),
            '1' => Some(Value::One),
            'x' | 'X' | '-' => Some(Value::DontCare),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Value::Zero => '0',
            Value::One => '1',
            Value::DontCare => 'x',
        }
    }

    pub fn is_dont_care(self) -> bool {
        self == Value::DontCare
    }

    /// Whether a variable with this value accepts the given assignment.
    pub fn accepts(self, value: bool) -> bool {
        match self {
            Value::Zero => !value,
            Value::One => value,
            Value::DontCare => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A product term as a fixed-width vector of [`Value`]s.
///
/// # Invariants
///
/// - The width never changes after creation; only positions are overwritten.
/// - Minterms are only comparable within the same literal ordering.
///   Comparing minterms of different widths panics.
#[derive(Debug, Clone)]
pub struct Minterm {
    values: Vec<Value>,
}

impl Minterm {
    pub fn new(values: Vec<Value>) -> Self {
        Minterm { values }
    }

    /// The all-`x` minterm of the given width (constant true).
    pub fn dont_care(width: usize) -> Self {
        Minterm {
            values: vec![Value::DontCare; width],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn get(&self, position: usize) -> Value {
        self.values[position]
    }

    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn set(&mut self, position: usize, value: Value) {
        self.values[position] = value;
    }

    /// Returns a copy of this minterm with `position` replaced by `value`.
    pub fn with(&self, position: usize, value: Value) -> Self {
        let mut result = self.clone();
        result.set(position, value);
        result
    }

    /// Whether every position is `x`.
    pub fn is_tautology(&self) -> bool {
        self.values.iter().all(|v| v.is_dont_care())
    }

    /// Whether the product term is true under `assignment`.
    pub fn covers(&self, assignment: &[bool]) -> bool {
        self.check_width(assignment.len());
        self.values.iter().zip(assignment).all(|(v, &b)| v.accepts(b))
    }

    /// Whether every assignment covered by `other` is also covered by `self`.
    pub fn contains(&self, other: &Minterm) -> bool {
        self.check_width(other.len());
        self.values
            .iter()
            .zip(&other.values)
            .all(|(&a, &b)| a.is_dont_care() || a == b)
    }

    /// Returns the only position where `self` and `other` differ, if there is exactly one.
    pub fn single_difference(&self, other: &Minterm) -> Option<usize> {
        self.check_width(other.len());
        let mut diff = None;
        for (i, (a, b)) in self.values.iter().zip(&other.values).enumerate() {
            if a != b {
                if diff.is_some() {
                    return None;
                }
                diff = Some(i);
            }
        }
        diff
    }

    fn check_width(&self, width: usize) {
        assert_eq!(
            self.len(),
            width,
            "Minterms of different widths belong to different literal sets"
        );
    }

    /// Renders the product term with literal names, e.g. `~a&c`.
    /// The all-`x` minterm renders as `1`.
    pub fn to_product_string(&self, literals: &LiteralSet) -> String {
        self.check_width(literals.len());
        let factors: Vec<String> = self
            .values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| match v {
                Value::Zero => Some(format!("~{}", &literals[i])),
                Value::One => Some(literals[i].to_string()),
                Value::DontCare => None,
            })
            .collect();
        if factors.is_empty() {
            "1".to_string()
        } else {
            factors.join("&")
        }
    }
}

impl PartialEq for Minterm {
    fn eq(&self, other: &Self) -> bool {
        self.check_width(other.len());
        self.values == other.values
    }
}

impl Eq for Minterm {}

impl fmt::Display for Minterm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.values {
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

impl FromStr for Minterm {
    type Err = Error;

    /// Parses the `01x` notation used by [`Display`][fmt::Display].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| Value::from_char(c).ok_or_else(|| Error::malformed(format!("invalid minterm value {:?}", c))))
            .collect::<Result<Vec<_>, _>>()
            .map(Minterm::new)
    }
}

/// A disjunction of minterms of the same width.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MintermSet {
    width: usize,
    minterms: Vec<Minterm>,
}

impl MintermSet {
    /// Empty set (constant false) over `width` literals.
    pub fn new(width: usize) -> Self {
        MintermSet {
            width,
            minterms: Vec::new(),
        }
    }

    /// # Panics
    ///
    /// Panics if some minterm does not have the given width.
    pub fn from_minterms(width: usize, minterms: impl IntoIterator<Item = Minterm>) -> Self {
        let mut set = MintermSet::new(width);
        for minterm in minterms {
            set.push(minterm);
        }
        set
    }

    /// Builds the minterm set of the right-hand side of `expr`.
    ///
    /// Every OR-separated disjunct becomes one minterm: a variable writes `1`
    /// at its position, or `0` when it is preceded by an odd number of `~`;
    /// unmentioned variables stay `x`. AND only separates factors within the
    /// same minterm.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownLiteral`] if a variable is missing from the expression's
    /// literal set, which only happens with inconsistent input.
    pub fn from_expression(expr: &Expression) -> Result<Self, Error> {
        let literals = expr.literals();
        let width = literals.len();
        let mut set = MintermSet::new(width);
        let mut current: Option<Minterm> = None;
        let mut invert = false;

        for token in expr.terms() {
            let minterm = current.get_or_insert_with(|| Minterm::dont_care(width));
            match token.as_operator() {
                None => {
                    let position = literals.position(token.text())?;
                    let value = Value::from_bool(!invert);
                    let previous = minterm.get(position);
                    if !previous.is_dont_care() && previous != value {
                        debug!(
                            "from_expression: {} appears in both polarities within one disjunct, keeping {}",
                            token.text(),
                            value
                        );
                    }
                    minterm.set(position, value);
                    invert = false;
                }
                Some(Operator::Not) => invert = !invert,
                Some(Operator::And) => {}
                Some(Operator::Or) => {
                    if let Some(done) = current.take() {
                        set.push(done);
                    }
                    invert = false;
                }
                Some(op @ (Operator::Assign | Operator::PostfixNot)) => {
                    return Err(Error::malformed(format!("unexpected '{}' in terms", op.as_char())));
                }
            }
        }
        if let Some(done) = current {
            set.push(done);
        }

        debug!("from_expression({}) -> {}", expr, set);
        Ok(set)
    }

    /// # Panics
    ///
    /// Panics if the minterm width differs from the set width.
    pub fn push(&mut self, minterm: Minterm) {
        assert_eq!(minterm.len(), self.width, "Minterm width must match the set width");
        self.minterms.push(minterm);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.minterms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minterms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Minterm> {
        self.minterms.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Minterm> {
        self.minterms.iter()
    }

    /// Returns `Some(false)` for the empty set, `Some(true)` when some minterm is
    /// all-`x`, and `None` otherwise.
    pub fn constant(&self) -> Option<bool> {
        if self.minterms.is_empty() {
            Some(false)
        } else if self.minterms.iter().any(Minterm::is_tautology) {
            Some(true)
        } else {
            None
        }
    }

    /// Positions constrained by at least one minterm.
    pub fn support(&self) -> Vec<usize> {
        (0..self.width)
            .filter(|&i| self.minterms.iter().any(|m| !m.get(i).is_dont_care()))
            .collect()
    }

    /// Cofactor with respect to the variable at `position` fixed to `value`.
    ///
    /// Minterms that require the opposite value are dropped, the others are kept
    /// with `x` written at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn cofactor(&self, position: usize, value: bool) -> MintermSet {
        assert!(position < self.width, "Position {} out of range for width {}", position, self.width);
        let rejected = Value::from_bool(!value);
        let minterms = self
            .minterms
            .iter()
            .filter(|m| m.get(position) != rejected)
            .map(|m| m.with(position, Value::DontCare));
        MintermSet::from_minterms(self.width, minterms)
    }

    /// Shannon split on `position`: `(f|x=0, f|x=1)`.
    pub fn split(&self, position: usize) -> (MintermSet, MintermSet) {
        (self.cofactor(position, false), self.cofactor(position, true))
    }

    /// Whether the function is true under `assignment`.
    ///
    /// # Panics
    ///
    /// Panics if `assignment.len() != self.width()`.
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        assert_eq!(assignment.len(), self.width, "Assignment width must match the set width");
        self.minterms.iter().any(|m| m.covers(assignment))
    }

    /// Reduces the cover without changing the function.
    ///
    /// Duplicates and minterms contained in another one are dropped, then pairs
    /// of minterms differing in exactly one position are merged into a single
    /// minterm with `x` at that position, until no pair can be merged.
    /// This is adjacency merging only; the result is not guaranteed to be a
    /// minimal cover.
    pub fn reduce(&self) -> MintermSet {
        let mut current = self.without_redundant();

        // Capped at width + 1 rounds.
        for round in 0..=self.width {
            let n = current.minterms.len();
            let mut used = vec![false; n];
            let mut merged: Vec<Minterm> = Vec::new();

            for i in 0..n {
                for j in (i + 1)..n {
                    if let Some(pos) = current.minterms[i].single_difference(&current.minterms[j]) {
                        used[i] = true;
                        used[j] = true;
                        let m = current.minterms[i].with(pos, Value::DontCare);
                        if !merged.contains(&m) {
                            merged.push(m);
                        }
                    }
                }
            }

            if merged.is_empty() {
                break;
            }
            debug!("reduce: round {}, {} merged", round, merged.len());

            let unused = current.minterms.into_iter().zip(used).filter(|(_, u)| !u).map(|(m, _)| m);
            current = MintermSet::from_minterms(self.width, merged.into_iter().chain(unused)).without_redundant();
        }

        debug!("reduce: {} -> {} minterms", self.len(), current.len());
        current
    }

    /// Drops duplicates (keeping the first) and minterms strictly contained in another one.
    fn without_redundant(&self) -> MintermSet {
        let kept = self.minterms.iter().enumerate().filter(|&(i, m)| {
            !self.minterms.iter().enumerate().any(|(k, other)| {
                k != i && other.contains(m) && (other != m || k < i)
            })
        });
        MintermSet::from_minterms(self.width, kept.map(|(_, m)| m.clone()))
    }

    /// Renders the cover as a sum of products, e.g. `a&~b | c`.
    /// Constant covers render as `0` and `1`.
    pub fn to_sop_string(&self, literals: &LiteralSet) -> String {
        match self.constant() {
            Some(false) => "0".to_string(),
            Some(true) => "1".to_string(),
            None => self
                .minterms
                .iter()
                .map(|m| m.to_product_string(literals))
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }
}

impl<'a> IntoIterator for &'a MintermSet {
    type Item = &'a Minterm;
    type IntoIter = std::slice::Iter<'a, Minterm>;

    fn into_iter(self) -> Self::IntoIter {
        self.minterms.iter()
    }
}

impl fmt::Display for MintermSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, m) in self.minterms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", m)?;
        }
        write!(f, "}}")
    }
}
