//! Control variable selection.
//!
//! The control variable of a Shannon step is the literal whose two polarities
//! split the minterms most evenly. For every position we count the minterms
//! with `0` and with `1` there (`x` counts toward neither) and pick the position
//! with the largest `min(zero_count, one_count)`.
//!
//! A position whose minimum is zero is never selected: either it is unused by
//! the remaining minterms or the function depends on it in one polarity only,
//! and splitting on it would leave one branch untouched.

use log::debug;

use crate::minterm::{MintermSet, Value};

/// Per-position `(zero_count, one_count)` over a minterm set.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ControlStatistics {
    zeros: Vec<usize>,
    ones: Vec<usize>,
}

impl ControlStatistics {
    pub fn compute(set: &MintermSet) -> Self {
        let width = set.width();
        let mut zeros = vec![0; width];
        let mut ones = vec![0; width];

        for minterm in set {
            for (j, value) in minterm.values().iter().enumerate() {
                match value {
                    Value::Zero => zeros[j] += 1,
                    Value::One => ones[j] += 1,
                    Value::DontCare => {}
                }
            }
        }

        ControlStatistics { zeros, ones }
    }

    pub fn width(&self) -> usize {
        self.zeros.len()
    }

    pub fn zero_count(&self, position: usize) -> usize {
        self.zeros[position]
    }

    pub fn one_count(&self, position: usize) -> usize {
        self.ones[position]
    }

    /// Worst-case branch size when splitting on `position`.
    pub fn balance(&self, position: usize) -> usize {
        self.zeros[position].min(self.ones[position])
    }

    /// Returns the position with the largest strictly positive balance.
    /// Ties go to the lowest position.
    ///
    /// `None` means no literal splits the set, which makes the node terminal.
    pub fn select(&self) -> Option<usize> {
        let mut control = None;
        let mut best = 0;
        for j in 0..self.width() {
            let balance = self.balance(j);
            if balance > best {
                control = Some(j);
                best = balance;
            }
        }
        debug!("select: zeros = {:?}, ones = {:?} -> {:?}", self.zeros, self.ones, control);
        control
    }
}

/// Shortcut for `ControlStatistics::compute(set).select()`.
pub fn select_control(set: &MintermSet) -> Option<usize> {
    ControlStatistics::compute(set).select()
}
