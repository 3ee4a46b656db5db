use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the ride-matching workspace",
    long_about = "A unified CLI for running the matching demo, benchmarks,\n\
                  and CI checks in the ride-matching workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the matching-pass demo
    Demo,
    /// Run Criterion benchmarks
    Bench,
    /// Run CI checks (fmt, clippy, tests, demo, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run the demo example
    Demo,
    /// Run benchmarks
    Bench,
    /// Run check + demo + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

// ── jobs ───────────────────────────────────────────────────────────

fn ci_check() {
    step("cargo fmt --check");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("cargo clippy");
    run_cargo(&[
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ]);

    step("cargo test");
    run_cargo(&["test", "--workspace"]);
}

fn ci_demo() {
    step("cargo run --example matching_pass");
    run_cargo(&["run", "-p", "match_core", "--example", "matching_pass"]);
}

fn ci_bench() {
    step("cargo bench");
    run_cargo(&["bench", "-p", "match_core"]);
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => ci_demo(),
        Commands::Bench => ci_bench(),
        Commands::Ci { job } => match job {
            CiJob::Check => ci_check(),
            CiJob::Demo => ci_demo(),
            CiJob::Bench => ci_bench(),
            CiJob::All => {
                ci_check();
                ci_demo();
                ci_bench();
            }
        },
    }
}
