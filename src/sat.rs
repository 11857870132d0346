//! Model counting for covers and decomposition trees.
//!
//! Counts are taken over all `2^width` assignments of the literal set and can
//! grow past `u64`, so they are returned as [`BigUint`].

use std::collections::HashMap;

use num_bigint::BigUint;

use crate::decompose::{Decomposition, DecompositionTree};
use crate::minterm::{MintermSet, Value};

/// Cofactors already counted, keyed by their minterm rows.
type SatCache = HashMap<Vec<Vec<Value>>, BigUint>;

impl MintermSet {
    /// Number of assignments of the `width` literals that satisfy the cover.
    ///
    /// Overlapping minterms are counted once: the cover is Shannon-expanded on
    /// its first supported position until every cofactor is constant.
    pub fn sat_count(&self) -> BigUint {
        let mut cache = HashMap::new();
        self._sat_count(&mut cache)
    }

    fn _sat_count(&self, cache: &mut SatCache) -> BigUint {
        match self.constant() {
            Some(false) => return BigUint::ZERO,
            Some(true) => return BigUint::from(1u32) << self.width(),
            None => {}
        }

        let key: Vec<Vec<Value>> = self.iter().map(|m| m.values().to_vec()).collect();
        if let Some(count) = cache.get(&key) {
            return count.clone();
        }

        // Non-constant covers always have a constrained position.
        let position = self.support()[0];
        let (low, high) = self.split(position);
        let count: BigUint = (low._sat_count(cache) + high._sat_count(cache)) >> 1;

        cache.insert(key, count.clone());
        count
    }
}

impl Decomposition {
    /// Number of satisfying assignments of the function represented by this node.
    ///
    /// Both cofactors of an expanded node leave the control variable free, so
    /// each of them counts every model twice.
    pub fn sat_count(&self) -> BigUint {
        let mut cache = HashMap::new();
        self._sat_count(&mut cache)
    }

    fn _sat_count(&self, cache: &mut SatCache) -> BigUint {
        match self {
            Decomposition::Terminal { residual } => residual._sat_count(cache),
            Decomposition::Expanded { low, high, .. } => (low._sat_count(cache) + high._sat_count(cache)) >> 1,
        }
    }
}

impl DecompositionTree {
    pub fn sat_count(&self) -> BigUint {
        self.root().sat_count()
    }
}
