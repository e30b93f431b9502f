//! The three fixed puzzles.
//!
//! - [`quadratic`]: two small integers tied by `x*x + 1 == y - 2`.
//! - [`bounds`]: two independent one-sided bounds.
//! - [`string_hash`]: recover a lowercase string from its djb2 hash.

use std::ops::RangeInclusive;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::ast::Term;
use crate::builder::{lowercase, range, Bounds, Query, Recurrence};
use crate::error::Result;
use crate::types::{Model, Var};

/// djb2 hash of the string the [`string_hash`] search is expected to recover.
pub const ORACLE: u64 = 0x1ae78b0243cbcf;

/// String lengths tried by the hash search by default.
pub const DEFAULT_LENGTHS: RangeInclusive<usize> = 2..=9;

/// `0 < x < 10`, `0 < y < 10`, `x*x + 1 == y - 2`.
pub fn quadratic() -> Query {
    let x = Var::new("x");
    let y = Var::new("y");
    let mut query = Query::new();
    query.push(range(&x, 0, 10, Bounds::Exclusive));
    query.push(range(&y, 0, 10, Bounds::Exclusive));
    query.push((Term::var(&x) * &x + 1).equals(Term::var(&y) - 2));
    query
}

/// `x1 < 99` and `x2 > 20`, kept as two separate constraints.
///
/// Equivalent to asserting `And(x1 < 99, x2 > 20)` once.
pub fn bounds() -> Query {
    let x1 = Var::new("x1");
    let x2 = Var::new("x2");
    let mut query = Query::new();
    query.push(Term::var(&x1).lt(99));
    query.push(Term::var(&x2).gt(20));
    query
}

/// Unknowns `x0..x{len-1}` for [`string_hash`].
pub fn hash_vars(len: usize) -> Vec<Var> {
    Var::indexed("x", len)
}

/// Lowercase string of length `len` whose djb2 hash is `oracle`.
///
/// One inclusive `'a'..='z'` range per character, then the recurrence.
/// Fails with [`Error::EmptyRecurrence`][crate::error::Error::EmptyRecurrence]
/// when `len == 0`.
pub fn string_hash(len: usize, oracle: impl Into<BigInt>) -> Result<Query> {
    let oracle: BigInt = oracle.into();
    let vars = hash_vars(len);
    let mut query: Query = vars.iter().map(lowercase).collect();
    query.push(Recurrence::djb2().constrain(&vars, oracle)?);
    Ok(query)
}

/// Reads `vars` out of `model` as characters.
///
/// Returns `None` if a variable is missing or not a valid `char`.
pub fn decode_chars(model: &Model, vars: &[Var]) -> Option<String> {
    vars.iter()
        .map(|v| model.get(v).and_then(|n| n.to_u32()).and_then(char::from_u32))
        .collect()
}
