//! Recover a lowercase string from its djb2 hash.
//!
//! Run with: `cargo run --example string_hash`
//!
//! For every candidate length `n`, the unknowns `x0..x{n-1}` are restricted to
//! `'a'..='z'` and folded through `acc = acc*33 + x` from the seed `0x1505`.
//! The solver is asked for an assignment where the final accumulator equals
//! the oracle. Lengths are tried independently; every one is reported.

use clap::Parser;
use num_bigint::BigInt;
use puzzle_smt::puzzles::{self, DEFAULT_LENGTHS, ORACLE};
use puzzle_smt::sat::{Backend, Solver};

fn parse_oracle(s: &str) -> Result<BigInt, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => BigInt::parse_bytes(hex.as_bytes(), 16),
        None => BigInt::parse_bytes(s.as_bytes(), 10),
    };
    parsed.ok_or_else(|| format!("`{}` is not a decimal or 0x-prefixed hex integer", s))
}

#[derive(Parser)]
#[command(name = "string_hash")]
#[command(about = "Invert a djb2 hash over lowercase strings")]
struct Args {
    /// Target hash value (decimal or 0x hex)
    #[arg(long, value_parser = parse_oracle, default_value_t = BigInt::from(ORACLE))]
    oracle: BigInt,

    /// Shortest string length to try
    #[arg(long, default_value_t = *DEFAULT_LENGTHS.start())]
    min_len: usize,

    /// Longest string length to try
    #[arg(long, default_value_t = *DEFAULT_LENGTHS.end())]
    max_len: usize,

    /// Solver binary to use (z3 or cvc5)
    #[arg(long, default_value = "z3")]
    solver: Backend,

    /// Print the SMT-LIB script before each solve
    #[arg(long)]
    emit_smt2: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut solver = Solver::new(args.solver)?;

    for n in args.min_len..=args.max_len {
        println!("Trying for n = {}", n);
        let query = puzzles::string_hash(n, args.oracle.clone())?;
        println!("Constraints: {}\n", query);
        if args.emit_smt2 {
            print!("{}", query.to_smtlib());
        }

        let result = solver.solve(&query)?;
        println!("{}", result);
        if let Some(model) = result.model() {
            if let Some(text) = puzzles::decode_chars(model, &puzzles::hash_vars(n)) {
                println!("Recovered string: {:?}", text);
            }
        }
        println!();
    }

    Ok(())
}
