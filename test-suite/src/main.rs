//! Custom test runner for the Unicity case files.

use std::path::PathBuf;

use clap::Parser;
use nu_ansi_term::Color;
use test_suite::TestRunner;

#[derive(Parser)]
#[command(name = "test-suite", about = "Unicity test suite runner")]
struct Args {
    /// Filter tests by name pattern (substring match)
    #[arg(short, long)]
    filter: Option<String>,

    /// Print each case's description
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding the JSON case files
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/cases"))]
    cases: PathBuf,
}

fn main() {
    let args = Args::parse();
    let runner = TestRunner::new(&args.cases);

    let report = match runner.run_matching(args.filter.as_deref()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {e:#}", Color::Red.bold().paint("Error:"));
            std::process::exit(1);
        }
    };

    if report.total() == 0 {
        println!("{} No test cases found", Color::Yellow.bold().paint("Warning:"));
        return;
    }

    for case in &report.cases {
        let status = if case.passed() {
            Color::Green.bold().paint("PASS")
        } else {
            Color::Red.bold().paint("FAIL")
        };
        let pinned = if case.warnings_checked { " (+warnings)" } else { "" };
        println!(
            "  {status} {}{}",
            case.name,
            Color::DarkGray.paint(pinned)
        );
        if args.verbose && !case.description.is_empty() {
            println!("       {}", Color::DarkGray.paint(&case.description));
        }
    }

    let failures: Vec<_> = report.failures().collect();
    for case in &failures {
        println!("\n  {}", Color::Red.bold().paint(&case.name));
        if !case.description.is_empty() {
            println!("    {}", case.description);
        }
        for line in case.failure.iter().flat_map(|f| f.lines()) {
            println!("    {line}");
        }
    }

    println!(
        "\n  Cases: {} passed, {} failed, {} total",
        report.passed(),
        failures.len(),
        report.total()
    );
    if report.is_success() {
        println!("{}", Color::Green.bold().paint("All tests passed!"));
    } else {
        println!(
            "{}",
            Color::Red.bold().paint(format!("{} test(s) failed.", failures.len()))
        );
        std::process::exit(1);
    }
}
