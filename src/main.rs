mod pool;
mod queue;
mod run;
mod segment;
mod sieve;
mod storage;

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "segsieve")]
#[command(about = "Parallel segmented Sieve of Eratosthenes", long_about = None)]
struct Cli {
    #[arg(help = "Largest number to test for primality (inclusive)")]
    max_number: usize,

    #[arg(help = "Number of worker threads")]
    thread_count: usize,

    #[arg(
        short,
        long,
        default_value = "primes.txt",
        help = "File the prime listing is written to"
    )]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let start = Instant::now();

    let report = match run::run(cli.max_number, cli.thread_count) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: segsieve <max_number> <thread_count>");
            process::exit(1);
        }
    };

    if let Err(e) = storage::write_primes(&cli.output, &report.primes) {
        eprintln!("Error: cannot write '{}': {}", cli.output.display(), e);
        process::exit(1);
    }

    let duration_ms = start.elapsed().as_millis();

    println!("Results for range up to {}:", cli.max_number);
    println!("Total prime numbers found: {}", report.primes.len());
    println!("Segments processed: {}", report.segments);
    println!("Execution time: {} ms", duration_ms);
    println!("Threads used: {}", cli.thread_count);
    println!("Prime numbers written to '{}'", cli.output.display());

    if let Err(e) = storage::log_execution(
        cli.max_number,
        cli.thread_count,
        report.primes.len(),
        duration_ms,
    ) {
        eprintln!("Warning: Failed to log execution: {}", e);
    }
}
