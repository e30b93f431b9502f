use num_bigint::BigInt;

use crate::ast::{Formula, Term};
use crate::error::{Error, Result};
use crate::types::Model;

/// Evaluation under a concrete assignment.
pub trait Evaluate {
    type Output;

    fn evaluate(&self, model: &Model) -> Result<Self::Output>;
}

impl Model {
    pub fn eval<E: Evaluate + ?Sized>(&self, value: &E) -> Result<E::Output> {
        value.evaluate(self)
    }

    /// Whether `formula` holds; an unbound variable is an error, not `false`.
    pub fn satisfies(&self, formula: &Formula) -> Result<bool> {
        formula.evaluate(self)
    }
}

impl Evaluate for Term {
    type Output = BigInt;

    fn evaluate(&self, model: &Model) -> Result<BigInt> {
        Ok(match self {
            Term::Var(v) => model.get(v).cloned().ok_or_else(|| Error::Unbound(v.clone()))?,
            Term::Lit(n) => n.clone(),
            Term::Neg(a) => -a.evaluate(model)?,
            Term::Add(a, b) => a.evaluate(model)? + b.evaluate(model)?,
            Term::Sub(a, b) => a.evaluate(model)? - b.evaluate(model)?,
            Term::Mul(a, b) => a.evaluate(model)? * b.evaluate(model)?,
        })
    }
}

impl Evaluate for Formula {
    type Output = bool;

    fn evaluate(&self, model: &Model) -> Result<bool> {
        match self {
            Formula::Const(b) => Ok(*b),
            Formula::Cmp(op, a, b) => Ok(op.test(&a.evaluate(model)?, &b.evaluate(model)?)),
            Formula::And(parts) => {
                // Evaluate every conjunct so unbound variables are reported
                // even after a false one.
                let mut result = true;
                for part in parts {
                    result &= part.evaluate(model)?;
                }
                Ok(result)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::types::Var;

    #[test]
    fn test_eval_var() {
        let x = Var::new("x");
        let model = Model::new().with(&x, 42);
        assert_eq!(model.eval(&Term::var(&x)).unwrap(), BigInt::from(42));
    }

    #[test]
    fn test_eval_arith() {
        let x = Var::new("x");
        let y = Var::new("y");
        let t = -(Term::var(&x) * Term::var(&x) + 1 - Term::var(&y));
        let model = Model::new().with(&x, 3).with(&y, 4);
        assert_eq!(model.eval(&t).unwrap(), BigInt::from(-6));
    }

    #[test]
    fn test_eval_big() {
        let x = Var::new("x");
        let t = Term::var(&x) * Term::var(&x);
        let model = Model::new().with(&x, u64::MAX);
        let expected = BigInt::from(u64::MAX) * BigInt::from(u64::MAX);
        assert_eq!(model.eval(&t).unwrap(), expected);
    }

    #[test]
    fn test_eval_unbound() {
        let x = Var::new("x");
        let err = Model::new().eval(&Term::var(&x)).unwrap_err();
        assert!(matches!(err, Error::Unbound(v) if v == x));
    }

    #[test]
    fn test_eval_and() {
        let x = Var::new("x");
        let f = Formula::and([Term::lit(0).lt(&x), Term::var(&x).lt(10)]);
        assert!(Model::new().with(&x, 5).satisfies(&f).unwrap());
        assert!(!Model::new().with(&x, 10).satisfies(&f).unwrap());
        assert!(Model::new().satisfies(&Formula::and([])).unwrap());
    }

    #[test]
    fn test_eval_and_reports_unbound_after_false() {
        let x = Var::new("x");
        let y = Var::new("y");
        let f = Formula::and([Term::var(&x).lt(0), Term::var(&y).lt(0)]);
        let model = Model::new().with(&x, 1);
        assert!(matches!(model.satisfies(&f), Err(Error::Unbound(_))));
    }
}
