use std::fmt;
use std::str::FromStr;

use easy_smt::{Context, ContextBuilder, Response, SExpr};
use log::{debug, info};

use crate::builder::Query;
use crate::error::Result;
use crate::smt::{lower_formula, parse_numeral, symbol};
use crate::types::{Model, Var};

/// Which external solver binary to drive.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Backend {
    #[default]
    Z3,
    Cvc5,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "z3" => Ok(Backend::Z3),
            "cvc5" => Ok(Backend::Cvc5),
            other => Err(format!("unknown solver `{}`, expected `z3` or `cvc5`", other)),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Z3 => write!(f, "z3"),
            Backend::Cvc5 => write!(f, "cvc5"),
        }
    }
}

/// Outcome of one satisfiability query.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SatResult {
    Sat(Model),
    Unsat,
    Unknown,
}

impl SatResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SatResult::Sat(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SatResult::Sat(model) => Some(model),
            _ => None,
        }
    }
}

/// Prints like z3's `solve()`.
impl fmt::Display for SatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SatResult::Sat(model) => write!(f, "{}", model),
            SatResult::Unsat => write!(f, "no solution"),
            SatResult::Unknown => write!(f, "failed to solve"),
        }
    }
}

/// A running external solver process.
///
/// Each [`solve`][Solver::solve] call runs in its own `push`/`pop` scope, so
/// one process can answer a sequence of unrelated queries.
pub struct Solver {
    ctx: Context,
    backend: Backend,
}

impl Solver {
    /// Spawns the solver binary. Fails if it is not on `PATH`.
    pub fn new(backend: Backend) -> Result<Self> {
        let mut ctx = match backend {
            Backend::Z3 => ContextBuilder::new().with_z3_defaults().build()?,
            Backend::Cvc5 => ContextBuilder::new().with_cvc5_defaults().build()?,
        };
        let yes = ctx.atom("true");
        ctx.set_option(":produce-models", yes)?;
        info!("Started {} solver", backend);
        Ok(Self { ctx, backend })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Asks the solver for a model of `query`.
    ///
    /// No retries and no timeout: whatever the solver answers is returned.
    pub fn solve(&mut self, query: &Query) -> Result<SatResult> {
        self.ctx.push()?;
        let result = self.solve_scoped(query);
        self.ctx.pop()?;
        result
    }

    fn solve_scoped(&mut self, query: &Query) -> Result<SatResult> {
        let vars = query.vars();
        let int = self.ctx.int_sort();
        let mut consts: Vec<SExpr> = Vec::with_capacity(vars.len());
        for v in &vars {
            consts.push(self.ctx.declare_const(symbol(v.name()), int)?);
        }

        for c in query.constraints() {
            let expr = lower_formula(&self.ctx, c);
            debug!("(assert {})", self.ctx.display(expr));
            self.ctx.assert(expr)?;
        }

        let response = self.ctx.check()?;
        info!("{} answered {:?} for {} constraints over {} variables", self.backend, response, query.len(), vars.len());

        match response {
            Response::Sat => Ok(SatResult::Sat(self.read_model(&vars, consts)?)),
            Response::Unsat => Ok(SatResult::Unsat),
            Response::Unknown => Ok(SatResult::Unknown),
        }
    }

    fn read_model(&mut self, vars: &[Var], consts: Vec<SExpr>) -> Result<Model> {
        let mut model = Model::new();
        if consts.is_empty() {
            return Ok(model);
        }
        let values = self.ctx.get_value(consts)?;
        for (var, (_, value)) in vars.iter().zip(values) {
            let text = self.ctx.display(value).to_string();
            model.insert(var.clone(), parse_numeral(&text)?);
        }
        Ok(model)
    }
}

/// One-shot [`Solver::solve`] on a fresh z3 process.
pub fn solve(query: &Query) -> Result<SatResult> {
    Solver::new(Backend::Z3)?.solve(query)
}
