//! Construction properties of the constraint builder.
//!
//! Everything here is checked by local evaluation; no solver is involved.

use num_bigint::BigInt;
use puzzle_smt::ast::Term;
use puzzle_smt::builder::{hash_recurrence, range, Bounds, Query, Recurrence};
use puzzle_smt::error::Error;
use puzzle_smt::puzzles::{self, ORACLE};
use puzzle_smt::types::{Model, Var};

// ─── Range Constraints ─────────────────────────────────────────────────────────

#[test]
fn range_accepts_exactly_the_interval() {
    let v = Var::new("v");
    for (low, high) in [(-4, 4), (0, 1), (0, 2), (97, 122)] {
        let strict = range(&v, low, high, Bounds::Exclusive);
        let inclusive = range(&v, low, high, Bounds::Inclusive);
        for value in (low - 3)..=(high + 3) {
            let model = Model::new().with(&v, value);
            assert_eq!(model.satisfies(&strict).unwrap(), low < value && value < high);
            assert_eq!(model.satisfies(&inclusive).unwrap(), low <= value && value <= high);
        }
    }
}

// ─── Hash Recurrence ───────────────────────────────────────────────────────────

#[test]
fn recurrence_agrees_with_direct_computation() {
    let cases: Vec<(i64, i64, Vec<i64>)> = vec![
        (33, 5381, vec![99, 97, 116]),
        (31, 0, vec![1]),
        (2, 1, vec![0, 1, 1, 0, 1]),
        (-7, 11, vec![-3, 12, 0, 5000]),
        (65599, 0, vec![115, 111, 108, 118, 101, 100, 105, 116]),
    ];
    for (m, s, values) in cases {
        let rec = Recurrence::new(m, s);
        let vars = Var::indexed("v", values.len());
        let values: Vec<BigInt> = values.iter().map(|&x| BigInt::from(x)).collect();
        let model: Model = vars.iter().cloned().zip(values.iter().cloned()).collect();

        let direct = values.iter().fold(BigInt::from(s), |acc, x| acc * m + x);
        assert_eq!(rec.compute(&values), direct);
        assert_eq!(model.eval(&rec.fold(&vars).unwrap()).unwrap(), direct);

        let formula = rec.constrain(&vars, direct.clone()).unwrap();
        assert!(model.satisfies(&formula).unwrap());
        let off_by_one = rec.constrain(&vars, direct + 1).unwrap();
        assert!(!model.satisfies(&off_by_one).unwrap());
    }
}

#[test]
fn recurrence_rejects_empty_input() {
    assert!(matches!(Recurrence::djb2().fold(&[]), Err(Error::EmptyRecurrence)));
    assert!(matches!(hash_recurrence(&[], 33, ORACLE), Err(Error::EmptyRecurrence)));
    assert!(matches!(puzzles::string_hash(0, ORACLE), Err(Error::EmptyRecurrence)));
}

// ─── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn quadratic_equality() {
    let x = Var::new("x");
    let y = Var::new("y");
    let eq = (Term::var(&x) * &x + 1).equals(Term::var(&y) - 2);

    assert!(Model::new().with(&x, 3).with(&y, 12).satisfies(&eq).unwrap());
    assert!(!Model::new().with(&x, 3).with(&y, 5).satisfies(&eq).unwrap());
}

#[test]
fn cat_is_the_only_three_letter_preimage() {
    let target = Recurrence::djb2().hash_bytes(b"cat");
    let query = puzzles::string_hash(3, target).unwrap();
    let vars = puzzles::hash_vars(3);

    let mut found = Vec::new();
    for a in b'a'..=b'z' {
        for b in b'a'..=b'z' {
            for c in b'a'..=b'z' {
                let model = Model::new().with(&vars[0], a).with(&vars[1], b).with(&vars[2], c);
                if query.check(&model).unwrap() {
                    found.push(puzzles::decode_chars(&model, &vars).unwrap());
                }
            }
        }
    }
    assert_eq!(found, ["cat"]);
}

#[test]
fn cat_query_rejects_out_of_range_codes() {
    let target = Recurrence::djb2().hash_bytes(b"cat");
    let query = puzzles::string_hash(3, target).unwrap();
    let vars = puzzles::hash_vars(3);

    // Same hash, but the middle code leaves 'a'..='z': c*33^2 + b*33 + t
    // is unchanged by (b - 1, t + 33).
    let shifted = Model::new().with(&vars[0], 99).with(&vars[1], 96).with(&vars[2], 116 + 33);
    let direct = Recurrence::djb2().compute(&[BigInt::from(99), BigInt::from(96), BigInt::from(149)]);
    assert_eq!(direct, Recurrence::djb2().hash_bytes(b"cat"));
    assert!(!query.check(&shifted).unwrap());

    for bad in [0, 96, 123, 255] {
        let model = Model::new().with(&vars[0], bad).with(&vars[1], 97).with(&vars[2], 116);
        assert!(!query.check(&model).unwrap());
    }
}

#[test]
fn default_oracle_spells_solvedit() {
    let vars = puzzles::hash_vars(8);
    let query = puzzles::string_hash(8, ORACLE).unwrap();
    let model: Model = vars.iter().cloned().zip("solvedit".bytes().map(BigInt::from)).collect();
    assert!(query.check(&model).unwrap());
}

#[test]
fn query_preserves_order() {
    let query: Query = puzzles::quadratic().constraints().iter().rev().cloned().collect();
    assert_eq!(
        query.to_string(),
        "(x*x + 1 == y - 2, And(0 < y, y < 10), And(0 < x, x < 10))"
    );
    let names: Vec<String> = query.vars().iter().map(|v| v.to_string()).collect();
    assert_eq!(names, ["x", "y"]);
}
