//! End-to-end tests for the decomposition pipeline.
//!
//! Tests go from expression text through tokens, expression, minterms and
//! control selection to the finished decomposition tree.

use shannon_mux::control::ControlStatistics;
use shannon_mux::decompose::{decompose, DecomposeConfig, Decomposer, Decomposition};
use shannon_mux::expr::Expression;
use shannon_mux::minterm::{MintermSet, Value};
use shannon_mux::token::{concat, normalize, tokenize};
use shannon_mux::Error;

use test_log::test;

fn assignments(width: usize) -> impl Iterator<Item = Vec<bool>> {
    (0..1usize << width).map(move |i| (0..width).map(|j| (i >> j) & 1 == 1).collect())
}

fn rows(set: &MintermSet) -> Vec<String> {
    set.iter().map(|m| m.to_string()).collect()
}

const SAMPLES: &[&str] = &[
    "f = a",
    "f = ~a",
    "f = a & ~b | ~a & b",
    "f = ~a & ~b | a & b",
    "f = ~a*~b&~c | a&~b*c + a&b&~c | a&b&c | d",
    "d4 = ~d0 & ~d1 & ~d2 | d0 & ~d1 & ~d2 | d0 & d1 & ~d2 | d0 & d1 & d2 | d3",
    "f = ~a & b | ~a & c | a & d",
    "f = a | b | c & ~a | d & b | c | d",
    "f = x'y'z' + x'y'z + x'y&z + x&y'z' + x&y'z",
    "f = ~D & E | D & C & A | D & ~C & B",
    "f = a&b | ~a&~b | a&~b | ~a&b",
];

// ─── Tokens and Expressions ────────────────────────────────────────────────────

#[test]
fn tokens_concatenate_to_normalized_input() {
    for text in SAMPLES.iter().filter(|t| !t.contains('\'')) {
        let normalized = normalize(text);
        let tokens = tokenize(&normalized).unwrap();
        assert_eq!(concat(&tokens), normalized);
    }
}

#[test]
fn literal_set_in_first_seen_order() {
    let expr = Expression::parse("f=~a&~b|a&b").unwrap();
    assert_eq!(expr.literals().iter().collect::<Vec<_>>(), ["a", "b"]);

    for text in SAMPLES {
        let expr = Expression::parse(text).unwrap();
        let mut seen: Vec<&str> = Vec::new();
        for token in expr.terms().iter().filter(|t| t.is_variable()) {
            if !seen.contains(&token.text()) {
                seen.push(token.text());
            }
        }
        assert_eq!(expr.literals().iter().collect::<Vec<_>>(), seen, "{}", text);
    }
}

#[test]
fn reparsing_canonical_form_is_idempotent() {
    for text in SAMPLES {
        let expr = Expression::parse(text).unwrap();
        let again = Expression::parse(&expr.to_string()).unwrap();
        assert_eq!(again.literals(), expr.literals());
        assert_eq!(
            MintermSet::from_expression(&again).unwrap(),
            MintermSet::from_expression(&expr).unwrap()
        );
    }
}

#[test]
fn malformed_inputs() {
    for text in ["", "f", "f = ", "= a", "f = a = b", "f & g = a", "f = a &", "f = & a", "f = a || b"] {
        assert!(
            matches!(decompose(text), Err(Error::MalformedExpression(_))),
            "{:?}",
            text
        );
    }
}

// ─── Minterms and Control Selection ────────────────────────────────────────────

#[test]
fn one_minterm_per_disjunct() {
    let expr = Expression::parse("f=a&~b|~a&b").unwrap();
    let set = MintermSet::from_expression(&expr).unwrap();
    assert_eq!(rows(&set), ["10", "01"]);

    for text in SAMPLES {
        let expr = Expression::parse(text).unwrap();
        let set = MintermSet::from_expression(&expr).unwrap();
        let disjuncts = expr.to_string().matches('|').count() + 1;
        assert_eq!(set.len(), disjuncts, "{}", text);
        assert!(set.iter().all(|m| m.len() == expr.literals().len()));
    }
}

#[test]
fn five_term_example() {
    let expr = Expression::parse("f=~a*~b&~c|a&~b*c+a&b&~c|a&b&c|d").unwrap();
    assert_eq!(expr.to_string(), "f=~a&~b&~c|a&~b&c|a&b&~c|a&b&c|d");
    assert_eq!(expr.literals().iter().collect::<Vec<_>>(), ["a", "b", "c", "d"]);

    let set = MintermSet::from_expression(&expr).unwrap();
    assert_eq!(set.len(), 5);
    let d: Vec<Value> = set.iter().map(|m| m.get(3)).collect();
    assert_eq!(
        d,
        [Value::DontCare, Value::DontCare, Value::DontCare, Value::DontCare, Value::One]
    );

    let stats = ControlStatistics::compute(&set);
    assert_eq!(stats.balance(3), 0);
    assert_ne!(stats.select(), Some(3));
}

#[test]
fn control_tie_resolves_to_first_literal() {
    let expr = Expression::parse("f = a&~b | ~a&b | a&b").unwrap();
    let set = MintermSet::from_expression(&expr).unwrap();
    let stats = ControlStatistics::compute(&set);
    assert_eq!(stats.balance(0), 1);
    assert_eq!(stats.balance(1), 1);
    assert_eq!(stats.select(), Some(0));
}

// ─── Decomposition ─────────────────────────────────────────────────────────────

fn check_node(node: &Decomposition, depth: usize, max_depth: usize, minimize: bool) {
    assert!(depth <= max_depth);
    if let Decomposition::Expanded { control, residual, low, high } = node {
        let j = *control;
        let stats = ControlStatistics::compute(residual);
        assert!(stats.balance(j) > 0);

        // Children are exactly the cofactors of the node's residual (reduced when minimizing).
        let (expected_low, expected_high) = residual.split(j);
        if minimize {
            assert_eq!(low.residual(), &expected_low.reduce());
            assert_eq!(high.residual(), &expected_high.reduce());
        } else {
            assert_eq!(low.residual(), &expected_low);
            assert_eq!(high.residual(), &expected_high);
        }

        check_node(low, depth + 1, max_depth, minimize);
        check_node(high, depth + 1, max_depth, minimize);
    }
}

#[test]
fn recursion_depth_bounded_by_literal_count() {
    for minimize in [false, true] {
        let decomposer = Decomposer::new(DecomposeConfig::default().with_minimize(minimize));
        for text in SAMPLES {
            let tree = decomposer.decompose(text).unwrap();
            let n = tree.literals().len();
            assert!(tree.root().depth() <= n, "{}", text);
            check_node(tree.root(), 0, n, minimize);
        }
    }
}

#[test]
fn decomposition_is_equivalent_to_input() {
    for minimize in [false, true] {
        let decomposer = Decomposer::new(DecomposeConfig::default().with_minimize(minimize));
        for text in SAMPLES {
            let expr = Expression::parse(text).unwrap();
            let set = MintermSet::from_expression(&expr).unwrap();
            let tree = decomposer.decompose_expression(&expr).unwrap();
            for assignment in assignments(set.width()) {
                assert_eq!(tree.root().evaluate(&assignment), set.evaluate(&assignment), "{}", text);
            }
            assert_eq!(tree.sat_count(), set.sat_count(), "{}", text);
        }
    }
}

#[test]
fn tautology_decomposes_to_true_terminals() {
    let tree = decompose("f = a&b | ~a&~b | a&~b | ~a&b").unwrap();
    for terminal in tree.root().terminals() {
        assert_eq!(terminal.constant(), Some(true));
    }

    let minimized = Decomposer::new(DecomposeConfig::default().with_minimize(true))
        .decompose("f = a&b | ~a&~b | a&~b | ~a&b")
        .unwrap();
    assert!(minimized.root().is_terminal());
    assert_eq!(minimized.to_string(), "f = 1");
}

#[test]
fn multiplexer_rendering() {
    let tree = Decomposer::new(DecomposeConfig::default().with_minimize(true))
        .decompose("f = ~a & ~b & ~c | a & ~b & ~c | a & b & ~c | a & b & c")
        .unwrap();
    assert_eq!(tree.to_string(), "f = ~b(~c) | b(a)");
}
