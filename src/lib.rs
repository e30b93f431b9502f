//! # puzzle-smt: integer constraint puzzles for SMT solvers
//!
//! **`puzzle-smt`** builds small systems of integer constraints and hands them
//! to an external SMT solver (z3 or cvc5) for a satisfying assignment.
//! The solving itself happens entirely in the solver process; this crate only
//! assembles the constraints, lowers them to SMT-LIB and reads the model back.
//!
//! ## Basic Usage
//!
//! ```rust
//! use puzzle_smt::ast::Term;
//! use puzzle_smt::builder::{range, Bounds, Query};
//! use puzzle_smt::types::{Model, Var};
//!
//! let x = Var::new("x");
//! let y = Var::new("y");
//!
//! let mut query = Query::new();
//! query.push(range(&x, 0, 10, Bounds::Exclusive));
//! query.push((Term::var(&x) * &x + 1).equals(Term::var(&y) - 2));
//! assert_eq!(query.to_string(), "(And(0 < x, x < 10), x*x + 1 == y - 2)");
//!
//! // Check a candidate model locally, without a solver
//! let model = Model::new().with(&x, 3).with(&y, 12);
//! assert!(query.check(&model).unwrap());
//! ```
//!
//! Solving needs a solver binary on `PATH`:
//!
//! ```no_run
//! use puzzle_smt::puzzles;
//! use puzzle_smt::sat::{Backend, Solver};
//!
//! let mut solver = Solver::new(Backend::Z3)?;
//! let result = solver.solve(&puzzles::quadratic())?;
//! println!("{}", result); // e.g. [x = 1, y = 4]
//! # Ok::<(), puzzle_smt::error::Error>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`ast`]**: integer terms and constraint formulas.
//! - **[`builder`]**: range and hash-recurrence constraints, and the ordered [`Query`][crate::builder::Query].
//! - **[`eval`]**: evaluation under a concrete [`Model`][crate::types::Model].
//! - **[`smt`]**: SMT-LIB lowering.
//! - **[`sat`]**: the external solver bridge.
//! - **[`puzzles`]**: the fixed puzzles.

pub mod ast;
pub mod builder;
pub mod error;
pub mod eval;
pub mod puzzles;
pub mod sat;
pub mod smt;
pub mod types;
