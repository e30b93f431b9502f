//! Integer unknowns and the assignments that give them values.
//!
//! A [`Var`] is identified purely by its name: two variables with the same
//! name denote the same unknown, just like two `declare-const` commands for
//! the same symbol would in SMT-LIB.
use std::fmt;

use num_bigint::BigInt;

/// An unbounded integer unknown.
///
/// # Invariants
///
/// - The name is non-empty
/// - The name contains neither `|` nor `\`, so it always has an SMT-LIB spelling
/// - Equality and hashing go by name only
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(String);

impl Var {
    /// Creates a variable with the given name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains `|` or `\`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "Variable names must be non-empty");
        assert!(
            !name.contains(['|', '\\']),
            "Variable names must not contain `|` or `\\`: {:?}",
            name
        );
        Var(name)
    }

    /// Creates `count` variables named `{prefix}0`, `{prefix}1`, ...
    pub fn indexed(prefix: &str, count: usize) -> Vec<Var> {
        (0..count).map(|i| Var::new(format!("{}{}", prefix, i))).collect()
    }

    /// Returns the variable name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A concrete assignment of integers to variables.
///
/// Entries keep insertion order, which for solver models is the order the
/// variables first appear in the query.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Model {
    values: Vec<(Var, BigInt)>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `var` to `value`, replacing any previous value.
    pub fn insert(&mut self, var: Var, value: impl Into<BigInt>) {
        let value = value.into();
        match self.values.iter_mut().find(|(v, _)| *v == var) {
            Some(entry) => entry.1 = value,
            None => self.values.push((var, value)),
        }
    }

    /// Builder-style [`insert`][Model::insert].
    pub fn with(mut self, var: &Var, value: impl Into<BigInt>) -> Self {
        self.insert(var.clone(), value);
        self
    }

    pub fn get(&self, var: &Var) -> Option<&BigInt> {
        self.values.iter().find(|(v, _)| v == var).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Var, &BigInt)> {
        self.values.iter().map(|(v, value)| (v, value))
    }
}

impl FromIterator<(Var, BigInt)> for Model {
    fn from_iter<I: IntoIterator<Item = (Var, BigInt)>>(iter: I) -> Self {
        let mut model = Model::new();
        for (var, value) in iter {
            model.insert(var, value);
        }
        model
    }
}

/// Prints like z3's `solve()` does: `[x = 1, y = 4]`.
impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (var, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", var, value)?;
        }
        write!(f, "]")
    }
}
