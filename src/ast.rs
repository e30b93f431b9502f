//! Integer terms and the constraints built from them.
//!
//! Terms are small boxed trees: variables and literals at the leaves,
//! `+`, `-`, `*` and negation inside. Comparing two terms yields a
//! [`Formula`], and formulas combine by conjunction.
//!
//! ```rust
//! use puzzle_smt::ast::{Formula, Term};
//! use puzzle_smt::types::Var;
//!
//! let x = Term::var(&Var::new("x"));
//! let y = Term::var(&Var::new("y"));
//! let f = (x.clone() * x + 1).equals(y - 2);
//! assert_eq!(f.to_string(), "x*x + 1 == y - 2");
//! ```

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_traits::Signed;

use crate::types::Var;

/// An integer-valued expression.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Term {
    Var(Var),
    Lit(BigInt),
    Neg(Box<Term>),
    Add(Box<Term>, Box<Term>),
    Sub(Box<Term>, Box<Term>),
    Mul(Box<Term>, Box<Term>),
}

impl Term {
    pub fn var(var: &Var) -> Self {
        Term::Var(var.clone())
    }

    pub fn lit(value: impl Into<BigInt>) -> Self {
        Term::Lit(value.into())
    }

    pub fn lt(self, rhs: impl Into<Term>) -> Formula {
        Formula::cmp(CmpOp::Lt, self, rhs)
    }

    pub fn le(self, rhs: impl Into<Term>) -> Formula {
        Formula::cmp(CmpOp::Le, self, rhs)
    }

    pub fn gt(self, rhs: impl Into<Term>) -> Formula {
        Formula::cmp(CmpOp::Gt, self, rhs)
    }

    pub fn ge(self, rhs: impl Into<Term>) -> Formula {
        Formula::cmp(CmpOp::Ge, self, rhs)
    }

    /// `self == rhs` as a constraint.
    ///
    /// Named so it does not shadow [`PartialEq::eq`].
    pub fn equals(self, rhs: impl Into<Term>) -> Formula {
        Formula::cmp(CmpOp::Eq, self, rhs)
    }

    pub fn not_equals(self, rhs: impl Into<Term>) -> Formula {
        Formula::cmp(CmpOp::Ne, self, rhs)
    }

    /// Pushes every variable of this term into `out`, skipping ones already there.
    pub fn collect_vars(&self, out: &mut Vec<Var>) {
        match self {
            Term::Var(v) => {
                if !out.contains(v) {
                    out.push(v.clone());
                }
            }
            Term::Lit(_) => {}
            Term::Neg(a) => a.collect_vars(out),
            Term::Add(a, b) | Term::Sub(a, b) | Term::Mul(a, b) => {
                a.collect_vars(out);
                b.collect_vars(out);
            }
        }
    }

    /// Size of the term tree (number of nodes).
    pub fn size(&self) -> usize {
        match self {
            Term::Var(_) | Term::Lit(_) => 1,
            Term::Neg(a) => 1 + a.size(),
            Term::Add(a, b) | Term::Sub(a, b) | Term::Mul(a, b) => 1 + a.size() + b.size(),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Term::Add(..) | Term::Sub(..) => 1,
            Term::Mul(..) => 2,
            Term::Neg(_) => 3,
            Term::Lit(n) if n.is_negative() => 3,
            Term::Var(_) | Term::Lit(_) => 4,
        }
    }
}

impl From<Var> for Term {
    fn from(var: Var) -> Self {
        Term::Var(var)
    }
}

impl From<&Var> for Term {
    fn from(var: &Var) -> Self {
        Term::var(var)
    }
}

impl From<BigInt> for Term {
    fn from(value: BigInt) -> Self {
        Term::Lit(value)
    }
}

impl From<&BigInt> for Term {
    fn from(value: &BigInt) -> Self {
        Term::Lit(value.clone())
    }
}

macro_rules! term_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Term {
                fn from(value: $t) -> Self {
                    Term::Lit(BigInt::from(value))
                }
            }
        )*
    };
}

term_from_int!(i32, i64, u8, u32, u64, usize);

impl<T: Into<Term>> Add<T> for Term {
    type Output = Term;

    fn add(self, rhs: T) -> Self::Output {
        Term::Add(Box::new(self), Box::new(rhs.into()))
    }
}

impl<T: Into<Term>> Sub<T> for Term {
    type Output = Term;

    fn sub(self, rhs: T) -> Self::Output {
        Term::Sub(Box::new(self), Box::new(rhs.into()))
    }
}

impl<T: Into<Term>> Mul<T> for Term {
    type Output = Term;

    fn mul(self, rhs: T) -> Self::Output {
        Term::Mul(Box::new(self), Box::new(rhs.into()))
    }
}

impl Neg for Term {
    type Output = Term;

    fn neg(self) -> Self::Output {
        Term::Neg(Box::new(self))
    }
}

// z3 style: `x*x + 1 == y - 2`.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = self.precedence();
        let child = |f: &mut fmt::Formatter<'_>, t: &Term, min: u8| -> fmt::Result {
            if t.precedence() < min {
                write!(f, "({})", t)
            } else {
                write!(f, "{}", t)
            }
        };
        match self {
            Term::Var(v) => write!(f, "{}", v),
            Term::Lit(n) => write!(f, "{}", n),
            Term::Neg(a) => {
                write!(f, "-")?;
                child(f, a, prec + 1)
            }
            Term::Add(a, b) => {
                child(f, a, prec)?;
                write!(f, " + ")?;
                child(f, b, prec)
            }
            Term::Sub(a, b) => {
                child(f, a, prec)?;
                write!(f, " - ")?;
                child(f, b, prec + 1)
            }
            Term::Mul(a, b) => {
                child(f, a, prec)?;
                write!(f, "*")?;
                child(f, b, prec + 1)
            }
        }
    }
}

/// Comparison operators.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CmpOp {
    /// Infix symbol as printed by z3's Python API.
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
        }
    }

    /// Operator as spelled in SMT-LIB. `Ne` has no direct spelling and is
    /// written as `distinct`.
    pub fn smtlib(self) -> &'static str {
        match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Eq => "=",
            CmpOp::Ne => "distinct",
        }
    }

    pub fn test<T: Ord>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
        }
    }
}

/// A constraint over integer terms.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Formula {
    Const(bool),
    Cmp(CmpOp, Term, Term),
    /// Conjunction; empty means `true`.
    And(Vec<Formula>),
}

impl Formula {
    pub fn cmp(op: CmpOp, lhs: impl Into<Term>, rhs: impl Into<Term>) -> Self {
        Formula::Cmp(op, lhs.into(), rhs.into())
    }

    pub fn and(parts: impl IntoIterator<Item = Formula>) -> Self {
        Formula::And(parts.into_iter().collect())
    }

    pub fn collect_vars(&self, out: &mut Vec<Var>) {
        match self {
            Formula::Const(_) => {}
            Formula::Cmp(_, a, b) => {
                a.collect_vars(out);
                b.collect_vars(out);
            }
            Formula::And(parts) => {
                for part in parts {
                    part.collect_vars(out);
                }
            }
        }
    }
}

impl From<bool> for Formula {
    fn from(value: bool) -> Self {
        Formula::Const(value)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Const(true) => write!(f, "True"),
            Formula::Const(false) => write!(f, "False"),
            Formula::Cmp(op, a, b) => write!(f, "{} {} {}", a, op.symbol(), b),
            Formula::And(parts) => {
                write!(f, "And(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", part)?;
                }
                write!(f, ")")
            }
        }
    }
}
