//! Constraint Builder
//!
//! Assembles the two kinds of constraints the puzzles are made of, and the
//! ordered [`Query`] that carries them to the solver.
//!
//! ## Range constraints
//!
//! ```text
//! Exclusive: And(low < v, v < high)
//! Inclusive: And(low <= v, v <= high)
//! ```
//!
//! ## Hash recurrence
//!
//! A multiplicative string hash folded over the unknowns, left to right:
//!
//! ```text
//! acc_0 = seed*m + v_0
//! acc_k = acc_{k-1}*m + v_k
//! ```
//!
//! The constraint asserts `acc_{n-1} == target`. With djb2 (`m = 33`,
//! `seed = 5381`) and character-range unknowns this asks the solver to
//! invert the hash.

use std::fmt;

use log::debug;
use num_bigint::BigInt;

use crate::ast::{Formula, Term};
use crate::error::{Error, Result};
use crate::types::{Model, Var};

/// Whether range bounds are strict or inclusive.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Bounds {
    /// `low < v < high`
    Exclusive,
    /// `low <= v <= high`
    Inclusive,
}

/// Builds `low < var < high` (or `low <= var <= high`) as one conjunction.
///
/// If the range is empty the formula is simply unsatisfiable.
pub fn range(var: &Var, low: impl Into<Term>, high: impl Into<Term>, bounds: Bounds) -> Formula {
    let low: Term = low.into();
    let v = Term::var(var);
    match bounds {
        Bounds::Exclusive => Formula::and([low.lt(v.clone()), v.lt(high)]),
        Bounds::Inclusive => Formula::and([low.le(v.clone()), v.le(high)]),
    }
}

/// Inclusive range over the lowercase ASCII letters `'a'..='z'`.
pub fn lowercase(var: &Var) -> Formula {
    range(var, u32::from(b'a'), u32::from(b'z'), Bounds::Inclusive)
}

/// Parameters of a multiplicative hash recurrence.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Recurrence {
    pub multiplier: BigInt,
    pub seed: BigInt,
}

impl Recurrence {
    pub fn new(multiplier: impl Into<BigInt>, seed: impl Into<BigInt>) -> Self {
        Self {
            multiplier: multiplier.into(),
            seed: seed.into(),
        }
    }

    /// Bernstein's djb2: multiplier 33, seed `0x1505`.
    pub fn djb2() -> Self {
        Self::new(33, 0x1505)
    }

    /// The accumulator term after folding all of `vars`.
    pub fn fold(&self, vars: &[Var]) -> Result<Term> {
        let (first, rest) = vars.split_first().ok_or(Error::EmptyRecurrence)?;
        let mut acc = Term::lit(&self.seed * &self.multiplier) + first;
        for v in rest {
            acc = acc * &self.multiplier + v;
        }
        Ok(acc)
    }

    /// `fold(vars) == target`.
    pub fn constrain(&self, vars: &[Var], target: impl Into<Term>) -> Result<Formula> {
        let acc = self.fold(vars)?;
        debug!("hash recurrence over {} variables, term size {}", vars.len(), acc.size());
        Ok(acc.equals(target))
    }

    /// Computes the recurrence directly over concrete values.
    ///
    /// Agrees with evaluating [`fold`][Recurrence::fold] under the matching
    /// assignment. An empty slice yields the bare seed.
    pub fn compute<'a, I>(&self, values: I) -> BigInt
    where
        I: IntoIterator<Item = &'a BigInt>,
    {
        values
            .into_iter()
            .fold(self.seed.clone(), |acc, v| acc * &self.multiplier + v)
    }

    /// Hash of a byte string, e.g. `djb2().hash_bytes(b"cat")`.
    pub fn hash_bytes(&self, bytes: &[u8]) -> BigInt {
        let values: Vec<BigInt> = bytes.iter().map(|&b| BigInt::from(b)).collect();
        self.compute(&values)
    }
}

/// Folds `vars` with `multiplier` from the fixed djb2 seed and asserts the
/// result equals `target`.
///
/// Fails with [`Error::EmptyRecurrence`] when `vars` is empty.
pub fn hash_recurrence(vars: &[Var], multiplier: impl Into<BigInt>, target: impl Into<Term>) -> Result<Formula> {
    Recurrence::new(multiplier, Recurrence::djb2().seed).constrain(vars, target)
}

/// An ordered satisfiability query.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Query {
    constraints: Vec<Formula>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, constraint: Formula) {
        self.constraints.push(constraint);
    }

    pub fn extend(&mut self, constraints: impl IntoIterator<Item = Formula>) {
        self.constraints.extend(constraints);
    }

    pub fn constraints(&self) -> &[Formula] {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Variables mentioned by the query, in order of first appearance.
    pub fn vars(&self) -> Vec<Var> {
        let mut vars = Vec::new();
        for c in &self.constraints {
            c.collect_vars(&mut vars);
        }
        vars
    }

    /// Whether `model` satisfies every constraint.
    pub fn check(&self, model: &Model) -> Result<bool> {
        for c in &self.constraints {
            if !model.satisfies(c)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl FromIterator<Formula> for Query {
    fn from_iter<I: IntoIterator<Item = Formula>>(iter: I) -> Self {
        Self {
            constraints: iter.into_iter().collect(),
        }
    }
}

/// Prints the query as a tuple, the way the constraints are listed before solving.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.constraints.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        if self.constraints.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_range_exclusive() {
        let x = Var::new("x");
        let f = range(&x, 0, 10, Bounds::Exclusive);
        assert_eq!(f.to_string(), "And(0 < x, x < 10)");
        for value in -5..15 {
            let holds = Model::new().with(&x, value).satisfies(&f).unwrap();
            assert_eq!(holds, 0 < value && value < 10, "x = {}", value);
        }
    }

    #[test]
    fn test_range_inclusive() {
        let x = Var::new("x");
        let f = range(&x, -3, 3, Bounds::Inclusive);
        for value in -10..10 {
            let holds = Model::new().with(&x, value).satisfies(&f).unwrap();
            assert_eq!(holds, (-3..=3).contains(&value), "x = {}", value);
        }
    }

    #[test]
    fn test_range_empty() {
        let x = Var::new("x");
        let f = range(&x, 5, 5, Bounds::Exclusive);
        for value in 0..10 {
            assert!(!Model::new().with(&x, value).satisfies(&f).unwrap());
        }
    }

    #[test]
    fn test_lowercase() {
        let c = Var::new("c");
        let f = lowercase(&c);
        assert_eq!(f.to_string(), "And(97 <= c, c <= 122)");
        assert!(Model::new().with(&c, 97).satisfies(&f).unwrap());
        assert!(Model::new().with(&c, 122).satisfies(&f).unwrap());
        assert!(!Model::new().with(&c, 96).satisfies(&f).unwrap());
        assert!(!Model::new().with(&c, 123).satisfies(&f).unwrap());
    }

    #[test]
    fn test_fold_shape() {
        let vars = Var::indexed("x", 3);
        let acc = Recurrence::new(33, 5381).fold(&vars).unwrap();
        assert_eq!(acc.to_string(), "((177573 + x0)*33 + x1)*33 + x2");
    }

    #[test]
    fn test_fold_empty() {
        let err = Recurrence::djb2().fold(&[]).unwrap_err();
        assert!(matches!(err, Error::EmptyRecurrence));
        assert!(matches!(hash_recurrence(&[], 33, 0), Err(Error::EmptyRecurrence)));
    }

    #[test]
    fn test_fold_matches_compute() {
        let rec = Recurrence::new(31, 7);
        let vars = Var::indexed("v", 4);
        let acc = rec.fold(&vars).unwrap();
        let values: Vec<BigInt> = [3, -1, 0, 250].into_iter().map(BigInt::from).collect();
        let model: Model = vars.iter().cloned().zip(values.iter().cloned()).collect();
        assert_eq!(model.eval(&acc).unwrap(), rec.compute(&values));
    }

    #[test]
    fn test_compute_djb2() {
        let rec = Recurrence::djb2();
        assert_eq!(rec.hash_bytes(b""), BigInt::from(5381));
        assert_eq!(rec.hash_bytes(b"cat"), BigInt::from(193488125));
    }

    #[test]
    fn test_query_vars_and_display() {
        let x = Var::new("x1");
        let y = Var::new("x2");
        let query: Query = [Term::var(&x).lt(99), Term::var(&y).gt(20)].into_iter().collect();
        assert_eq!(query.vars(), vec![x.clone(), y.clone()]);
        assert_eq!(query.to_string(), "(x1 < 99, x2 > 20)");

        let single: Query = [Term::var(&x).lt(99)].into_iter().collect();
        assert_eq!(single.to_string(), "(x1 < 99,)");
    }

    #[test]
    fn test_query_check() {
        let x = Var::new("x1");
        let y = Var::new("x2");
        let mut query = Query::new();
        query.push(Term::var(&x).lt(99));
        query.push(Term::var(&y).gt(20));
        assert!(query.check(&Model::new().with(&x, 0).with(&y, 21)).unwrap());
        assert!(!query.check(&Model::new().with(&x, 99).with(&y, 21)).unwrap());
        assert!(query.check(&Model::new().with(&x, 0)).is_err());
    }
}
