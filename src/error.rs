use thiserror::Error;

use crate::types::Var;

/// Errors raised while building, evaluating or solving constraints.
#[derive(Debug, Error)]
pub enum Error {
    /// The hash recurrence was asked to fold zero variables.
    #[error("hash recurrence needs at least one variable")]
    EmptyRecurrence,

    /// Evaluation hit a variable with no value.
    #[error("variable `{0}` has no value in the assignment")]
    Unbound(Var),

    /// Talking to the solver process failed.
    #[error("solver I/O failed: {0}")]
    Solver(#[from] std::io::Error),

    /// The solver answered with something that is not an integer literal.
    #[error("cannot read solver value `{0}` as an integer")]
    BadValue(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
