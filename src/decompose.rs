//! Recursive Shannon decomposition.
//!
//! Every Boolean function can be written as `f = ~x·f|x=0 | x·f|x=1`, i.e. as a
//! 2:1 multiplexer selected by `x` whose data inputs are the two cofactors.
//! Applying this recursively, with the control variable chosen by
//! [`ControlStatistics::select`][crate::control::ControlStatistics::select], gives a
//! binary tree of multiplexers whose leaves are residual covers that no
//! single variable splits any further.
//!
//! Each node goes `Unexpanded → Expanded(control, low, high) | Terminal`:
//!
//! - a constant residual (empty cover, or a cover containing the all-`x` minterm)
//!   is a terminal,
//! - a residual with no control variable is a terminal, to be realized directly
//!   as a sum of products,
//! - otherwise the residual is split on the control variable and both cofactors
//!   are expanded independently.
//!
//! The control variable is `x` in both cofactors, so it can never be chosen again
//! below, and the depth of the tree is bounded by the number of literals.
//!
//! # Example
//!
//! ```
//! use shannon_mux::decompose::{decompose, DecomposeConfig, Decomposer};
//!
//! let tree = decompose("f = ~s & a | s & b").unwrap();
//! assert_eq!(tree.root().control(), Some(0));
//! assert_eq!(tree.to_string(), "f = ~s(a) | s(b)");
//!
//! let decomposer = Decomposer::new(DecomposeConfig::default().with_minimize(true));
//! let tree = decomposer.decompose("f = ~a&~b&~c | a&~b&~c | a&b&~c | a&b&c | d").unwrap();
//! assert_eq!(tree.to_string(), "f = ~b(~c | d) | b(a | d)");
//! ```

use std::fmt;

use log::debug;

use crate::control::select_control;
use crate::error::Error;
use crate::expr::{Expression, LiteralSet};
use crate::minterm::MintermSet;

/// Configuration for [`Decomposer`].
#[derive(Debug, Clone, Default)]
pub struct DecomposeConfig {
    /// Reduce every residual with [`MintermSet::reduce`] before choosing its control variable.
    pub minimize: bool,
    /// Nodes at this depth become terminals (None for unbounded).
    pub max_depth: Option<usize>,
}

impl DecomposeConfig {
    /// Enable or disable residual reduction.
    pub fn with_minimize(mut self, minimize: bool) -> Self {
        self.minimize = minimize;
        self
    }

    /// Limit the depth of the decomposition tree.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// A node of the decomposition tree.
///
/// Children are owned exclusively, and every node owns its own residual cover.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Decomposition {
    /// Leaf: the residual is realized directly.
    Terminal { residual: MintermSet },
    /// Multiplexer on `control`: `low` is the cofactor for `control = 0`, `high` for `control = 1`.
    Expanded {
        control: usize,
        residual: MintermSet,
        low: Box<Decomposition>,
        high: Box<Decomposition>,
    },
}

impl Decomposition {
    pub fn control(&self) -> Option<usize> {
        match self {
            Decomposition::Terminal { .. } => None,
            Decomposition::Expanded { control, .. } => Some(*control),
        }
    }

    pub fn low(&self) -> Option<&Decomposition> {
        match self {
            Decomposition::Terminal { .. } => None,
            Decomposition::Expanded { low, .. } => Some(&**low),
        }
    }

    pub fn high(&self) -> Option<&Decomposition> {
        match self {
            Decomposition::Terminal { .. } => None,
            Decomposition::Expanded { high, .. } => Some(&**high),
        }
    }

    /// The cover this node was built from.
    pub fn residual(&self) -> &MintermSet {
        match self {
            Decomposition::Terminal { residual } => residual,
            Decomposition::Expanded { residual, .. } => residual,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Decomposition::Terminal { .. })
    }

    /// Constant value of a terminal, if its residual is constant.
    pub fn constant(&self) -> Option<bool> {
        match self {
            Decomposition::Terminal { residual } => residual.constant(),
            Decomposition::Expanded { .. } => None,
        }
    }

    /// Number of multiplexer levels on the longest path.
    pub fn depth(&self) -> usize {
        match self {
            Decomposition::Terminal { .. } => 0,
            Decomposition::Expanded { low, high, .. } => 1 + low.depth().max(high.depth()),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Decomposition::Terminal { .. } => 1,
            Decomposition::Expanded { low, high, .. } => 1 + low.node_count() + high.node_count(),
        }
    }

    /// Terminal nodes, left to right.
    pub fn terminals(&self) -> Vec<&Decomposition> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Decomposition::Terminal { .. } => result.push(node),
                Decomposition::Expanded { low, high, .. } => {
                    stack.push(&**high);
                    stack.push(&**low);
                }
            }
        }
        result
    }

    /// Follows the multiplexers selected by `assignment` and evaluates the terminal reached.
    ///
    /// # Panics
    ///
    /// Panics if `assignment.len()` differs from the width of the residual covers.
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        let mut node = self;
        loop {
            match node {
                Decomposition::Terminal { residual } => return residual.evaluate(assignment),
                Decomposition::Expanded { control, low, high, .. } => {
                    node = if assignment[*control] { &**high } else { &**low };
                }
            }
        }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, literals: &LiteralSet) -> fmt::Result {
        match self {
            Decomposition::Terminal { residual } => write!(f, "{}", residual.to_sop_string(literals)),
            Decomposition::Expanded { control, low, high, .. } => {
                let name = &literals[*control];
                write!(f, "~{}(", name)?;
                low.write(f, literals)?;
                write!(f, ") | {}(", name)?;
                high.write(f, literals)?;
                write!(f, ")")
            }
        }
    }
}

/// Result of decomposing one function definition.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DecompositionTree {
    name: String,
    literals: LiteralSet,
    root: Decomposition,
}

impl DecompositionTree {
    /// Function name (left-hand side).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Literals indexed by the control positions and minterms of the tree.
    pub fn literals(&self) -> &LiteralSet {
        &self.literals
    }

    pub fn root(&self) -> &Decomposition {
        &self.root
    }

    /// Name of the control variable of `node`, if it is expanded.
    pub fn control_name(&self, node: &Decomposition) -> Option<&str> {
        node.control().and_then(|c| self.literals.get(c))
    }
}

/// Renders the tree as a nested multiplexer expression, e.g. `f = ~b(~c) | b(a)`.
impl fmt::Display for DecompositionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = ", self.name)?;
        self.root.write(f, &self.literals)
    }
}

/// Builds decomposition trees with a fixed [`DecomposeConfig`].
#[derive(Debug, Clone, Default)]
pub struct Decomposer {
    config: DecomposeConfig,
}

impl Decomposer {
    pub fn new(config: DecomposeConfig) -> Self {
        Decomposer { config }
    }

    pub fn config(&self) -> &DecomposeConfig {
        &self.config
    }

    /// Parses `text` and decomposes the function it defines.
    pub fn decompose(&self, text: &str) -> Result<DecompositionTree, Error> {
        let expr = Expression::parse(text)?;
        self.decompose_expression(&expr)
    }

    pub fn decompose_expression(&self, expr: &Expression) -> Result<DecompositionTree, Error> {
        let set = MintermSet::from_expression(expr)?;
        let root = self.decompose_set(set);
        debug!(
            "decompose({}): depth = {}, nodes = {}",
            expr,
            root.depth(),
            root.node_count()
        );
        Ok(DecompositionTree {
            name: expr.name().to_string(),
            literals: expr.literals().clone(),
            root,
        })
    }

    /// Decomposes a cover directly.
    pub fn decompose_set(&self, set: MintermSet) -> Decomposition {
        self.expand(set, 0)
    }

    fn expand(&self, set: MintermSet, depth: usize) -> Decomposition {
        let set = if self.config.minimize { set.reduce() } else { set };

        if let Some(value) = set.constant() {
            debug!("expand(depth = {}): constant {}", depth, value);
            return Decomposition::Terminal { residual: set };
        }
        if self.config.max_depth.is_some_and(|max| depth >= max) {
            debug!("expand(depth = {}): depth limit reached", depth);
            return Decomposition::Terminal { residual: set };
        }

        let control = match select_control(&set) {
            Some(control) => control,
            None => {
                debug!("expand(depth = {}): no control variable for {}", depth, set);
                return Decomposition::Terminal { residual: set };
            }
        };

        let (low, high) = set.split(control);
        debug!(
            "expand(depth = {}): control = {}, low = {}, high = {}",
            depth, control, low, high
        );
        let low = self.expand(low, depth + 1);
        let high = self.expand(high, depth + 1);

        Decomposition::Expanded {
            control,
            residual: set,
            low: Box::new(low),
            high: Box::new(high),
        }
    }
}

/// Decomposes `text` with the default configuration.
///
/// # Errors
///
/// [`Error::MalformedExpression`] if `text` is not a valid function definition.
pub fn decompose(text: &str) -> Result<DecompositionTree, Error> {
    Decomposer::default().decompose(text)
}
