//! SMT-LIB 2 lowering.
//!
//! Terms and formulas are lowered through [`SmtBuilder`], which is
//! implemented both for `easy_smt::Context` (to talk to a live solver) and
//! for plain text (to print a standalone script).

use easy_smt::{Context, SExpr};
use num_bigint::{BigInt, Sign};
use num_traits::Signed;

use crate::ast::{Formula, Term};
use crate::builder::Query;
use crate::error::{Error, Result};

/// Something that can assemble S-expressions out of atoms and lists.
pub trait SmtBuilder {
    type Expr;

    fn atom(&self, name: String) -> Self::Expr;
    fn list(&self, items: Vec<Self::Expr>) -> Self::Expr;
}

impl SmtBuilder for Context {
    type Expr = SExpr;

    fn atom(&self, name: String) -> SExpr {
        Context::atom(self, name)
    }

    fn list(&self, items: Vec<SExpr>) -> SExpr {
        Context::list(self, items)
    }
}

/// Lowers to SMT-LIB source text.
#[derive(Debug, Copy, Clone, Default)]
pub struct Text;

impl SmtBuilder for Text {
    type Expr = String;

    fn atom(&self, name: String) -> String {
        name
    }

    fn list(&self, items: Vec<String>) -> String {
        format!("({})", items.join(" "))
    }
}

/// Words that cannot stand bare as a symbol: the SMT-LIB reserved words and
/// command names, plus the Core and Ints operators a query may use.
const RESERVED: &[&str] = &[
    // reserved words
    "!", "_", "as", "BINARY", "DECIMAL", "exists", "forall", "HEXADECIMAL", "let", "match",
    "NUMERAL", "par", "STRING",
    // commands
    "assert", "check-sat", "check-sat-assuming", "declare-const", "declare-datatype",
    "declare-datatypes", "declare-fun", "declare-sort", "define-fun", "define-fun-rec",
    "define-funs-rec", "define-sort", "echo", "exit", "get-assertions", "get-assignment",
    "get-info", "get-model", "get-option", "get-proof", "get-unsat-assumptions",
    "get-unsat-core", "get-value", "pop", "push", "reset", "reset-assertions", "set-info",
    "set-logic", "set-option",
    // Core and Ints
    "true", "false", "not", "=>", "and", "or", "xor", "=", "distinct", "ite", "Bool", "Int",
    "+", "-", "*", "div", "mod", "abs", "<", "<=", ">", ">=",
];

fn is_simple_symbol(name: &str) -> bool {
    const EXTRA: &str = "~!@$%^&*_-+=<>.?/";
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || EXTRA.contains(c) => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || EXTRA.contains(c)) && !RESERVED.iter().any(|&word| word == name)
}

/// SMT-LIB spelling of a variable name.
///
/// Simple symbols stay bare; anything else, including reserved words and
/// operator names, is written `|quoted|`. [`Var`][crate::types::Var] names
/// never contain `|` or `\`, so the quoted form is always well-formed.
pub fn symbol(name: &str) -> String {
    if is_simple_symbol(name) {
        name.to_string()
    } else {
        format!("|{}|", name)
    }
}

/// Integer literal; negative numbers become `(- n)`.
pub fn numeral<B: SmtBuilder>(b: &B, value: &BigInt) -> B::Expr {
    if value.is_negative() {
        let abs = b.atom(value.abs().to_string());
        b.list(vec![b.atom("-".to_string()), abs])
    } else {
        b.atom(value.to_string())
    }
}

fn op<B: SmtBuilder>(b: &B, name: &str, args: Vec<B::Expr>) -> B::Expr {
    let mut items = Vec::with_capacity(args.len() + 1);
    items.push(b.atom(name.to_string()));
    items.extend(args);
    b.list(items)
}

pub fn lower_term<B: SmtBuilder>(b: &B, term: &Term) -> B::Expr {
    match term {
        Term::Var(v) => b.atom(symbol(v.name())),
        Term::Lit(n) => numeral(b, n),
        Term::Neg(a) => op(b, "-", vec![lower_term(b, a)]),
        Term::Add(x, y) => op(b, "+", vec![lower_term(b, x), lower_term(b, y)]),
        Term::Sub(x, y) => op(b, "-", vec![lower_term(b, x), lower_term(b, y)]),
        Term::Mul(x, y) => op(b, "*", vec![lower_term(b, x), lower_term(b, y)]),
    }
}

pub fn lower_formula<B: SmtBuilder>(b: &B, formula: &Formula) -> B::Expr {
    match formula {
        Formula::Const(true) => b.atom("true".to_string()),
        Formula::Const(false) => b.atom("false".to_string()),
        Formula::Cmp(cmp, x, y) => op(b, cmp.smtlib(), vec![lower_term(b, x), lower_term(b, y)]),
        // `and` needs two or more arguments in strict SMT-LIB.
        Formula::And(parts) => match parts.as_slice() {
            [] => b.atom("true".to_string()),
            [single] => lower_formula(b, single),
            _ => op(b, "and", parts.iter().map(|p| lower_formula(b, p)).collect()),
        },
    }
}

impl Query {
    /// Renders the query as a standalone SMT-LIB 2 script.
    pub fn to_smtlib(&self) -> String {
        let vars = self.vars();
        let mut script = String::new();
        for v in &vars {
            script.push_str(&format!("(declare-const {} Int)\n", symbol(v.name())));
        }
        for c in self.constraints() {
            script.push_str(&format!("(assert {})\n", lower_formula(&Text, c)));
        }
        script.push_str("(check-sat)\n");
        if !vars.is_empty() {
            let names: Vec<String> = vars.iter().map(|v| symbol(v.name())).collect();
            script.push_str(&format!("(get-value ({}))\n", names.join(" ")));
        }
        script
    }
}

/// Reads an integer value as printed by a solver: `42`, `(- 42)` or `-42`.
pub fn parse_numeral(text: &str) -> Result<BigInt> {
    let bad = || Error::BadValue(text.to_string());
    let trimmed = text.trim();
    let (sign, digits) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => {
            let digits = inner.trim().strip_prefix('-').ok_or_else(bad)?;
            (Sign::Minus, digits.trim())
        }
        None => match trimmed.strip_prefix('-') {
            Some(digits) => (Sign::Minus, digits),
            None => (Sign::Plus, trimmed),
        },
    };
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return Err(bad());
    }
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(bad)?;
    Ok(match sign {
        Sign::Minus => -magnitude,
        _ => magnitude,
    })
}
