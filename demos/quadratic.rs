//! Two small integers tied by a quadratic equation.
//!
//! Run with: `cargo run --example quadratic`

use clap::Parser;
use puzzle_smt::puzzles;
use puzzle_smt::sat::{Backend, Solver};

#[derive(Parser)]
#[command(name = "quadratic")]
#[command(about = "Solve 0 < x < 10, 0 < y < 10, x*x + 1 == y - 2")]
struct Args {
    /// Solver binary to use (z3 or cvc5)
    #[arg(long, default_value = "z3")]
    solver: Backend,

    /// Print the SMT-LIB script before solving
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

    let query = puzzles::quadratic();
    println!("Constraints: {}", query);
    if args.emit_smt2 {
        print!("{}", query.to_smtlib());
    }

    let mut solver = Solver::new(args.solver)?;
    println!("{}", solver.solve(&query)?);

    Ok(())
}
