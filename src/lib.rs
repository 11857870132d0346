//! # shannon-mux: multiplexer decomposition of Boolean functions
//!
//! **`shannon-mux`** takes a textual Boolean function definition such as
//! `f = a·b' + a·c` and decomposes it into a tree of 2:1 multiplexers by repeated
//! **Shannon expansion**:
//!
//! ```text
//! f = ~x·f|x=0 | x·f|x=1
//! ```
//!
//! At each level the control variable `x` is the literal whose two polarities
//! split the function's minterms most evenly. The decomposition is greedy: each
//! choice is locally best, with no claim of global minimality.
//!
//! ## Pipeline
//!
//! ```text
//! &str --normalize/tokenize--> tokens --parse--> Expression
//!      --build--> MintermSet --select/split (recursively)--> DecompositionTree
//! ```
//!
//! ## Basic Usage
//!
//! ```rust
//! use shannon_mux::decompose::decompose;
//!
//! let tree = decompose("f = ~s*a + s*b").unwrap();
//!
//! // `s` selects between `a` and `b`
//! assert_eq!(tree.control_name(tree.root()), Some("s"));
//! assert_eq!(tree.to_string(), "f = ~s(a) | s(b)");
//!
//! // The tree computes the same function as the input
//! assert!(tree.root().evaluate(&[false, true, false]));
//! assert!(!tree.root().evaluate(&[true, true, false]));
//! ```
//!
//! ## Core Components
//!
//! - **[`token`]**: operator normalization and tokenizing, including postfix `'`.
//! - **[`expr`]**: parsing `name = rhs` into an [`Expression`][crate::expr::Expression] and its literal set.
//! - **[`minterm`]**: minterm vectors over `{0, 1, x}`, cofactors, and cover reduction.
//! - **[`control`]**: control variable selection.
//! - **[`decompose`][mod@decompose]**: the recursive Shannon expander and the [`decompose`][fn@decompose::decompose] entry point.
//! - **[`sat`]**: model counting.

pub mod control;
pub mod decompose;
pub mod error;
pub mod expr;
pub mod minterm;
pub mod sat;
pub mod token;

pub use error::Error;
