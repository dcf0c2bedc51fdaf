use anyhow::Result;
use clap::Parser;
use qkd_sim::config::{DEFAULT_QUBITS, DEFAULT_SEED};
use qkd_sim::protocols::bb84::Bb84Result;
use qkd_sim::protocols::e91::E91Result;
use qkd_sim::{Limits, Outcome, Protocol, SampleSummary, Sampler, SimulationCache, UNMEASURABLE};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Quantum key distribution simulator
#[derive(Parser, Debug)]
#[command(name = "qkd-sim", version, about)]
struct Cli {
    /// Protocol to simulate (bb84 or e91)
    #[arg(short, long, default_value = "bb84")]
    protocol: Protocol,

    /// Number of qubits
    #[arg(short = 'n', long, default_value_t = DEFAULT_QUBITS)]
    qubits: usize,

    /// Random seed for reproducible results
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Draw from system entropy instead of the seed
    #[arg(long)]
    no_seed: bool,

    /// Run this many consecutive seeds and report aggregate detection statistics
    #[arg(long)]
    shots: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let seed = (!cli.no_seed).then_some(cli.seed);
    let params = Limits::default().validate(cli.protocol, cli.qubits, seed)?;

    if let Some(shots) = cli.shots {
        let base_seed = params.seed().unwrap_or_else(rand::random);
        let summary = Sampler::new(params.protocol(), params.num_qubits()).run(base_seed, shots)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary, base_seed);
        }
        return Ok(());
    }

    let cache = SimulationCache::new();
    let start = std::time::Instant::now();
    let outcome = cache.get_or_run(params.protocol(), params.num_qubits(), params.seed())?;
    info!(
        protocol = %params.protocol(),
        elapsed = ?start.elapsed(),
        "simulation finished"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(outcome.as_ref())?);
        return Ok(());
    }

    match outcome.as_ref() {
        Outcome::Bb84(result) => print_bb84(result),
        Outcome::E91(result) => print_e91(result),
    }
    println!("Quantum channel:   {}", outcome.status());

    Ok(())
}

fn bit(b: bool) -> char {
    if b { '1' } else { '0' }
}

fn print_bb84(result: &Bb84Result) {
    let n = result.num_qubits();
    println!("=== BB84 Protocol ===");
    println!("Total qubits:      {n}");
    println!("Matched bases:     {} / {n}", result.matched_count());
    println!("Shared key length: {}", result.shared_key.len());
    println!("Intercepted:       {}", result.intercepted_count());
    println!("Error rate:        {:.2}%", result.error_rate * 100.0);
    println!();
    println!(" idx | A bit | A basis | sent | B basis | measured | B bit | match");
    for (i, record) in result.records().enumerate() {
        let measured = record
            .polarization_measured
            .map_or(UNMEASURABLE, |p| p.symbol());
        println!(
            "{i:>4} | {:>5} | {:>7} | {:>4} | {:>7} | {:>8} | {:>5} | {}",
            bit(record.bit),
            record.alice_basis,
            record.polarization_sent,
            record.bob_basis,
            measured,
            bit(record.bob_bit),
            if record.bases_matched { "yes" } else { "no" },
        );
    }
    println!();
    let key: String = result.shared_key.iter().map(|&b| bit(b)).collect();
    println!("Shared key:        {key}");
}

fn print_e91(result: &E91Result) {
    println!("=== E91 Protocol ===");
    println!("Total qubits:      {}", result.num_qubits());
    println!(
        "Agreeing bases:    {} / {}",
        result.agreement_count(),
        result.num_qubits()
    );
    println!("Correlation rate:  {:.2}%", result.correlation_rate * 100.0);
}

fn print_summary(summary: &SampleSummary, base_seed: u64) {
    println!("=== {} sampling ===", summary.protocol);
    println!("Qubits per run:    {}", summary.num_qubits);
    println!(
        "Seeds:             {base_seed}..{}",
        base_seed.wrapping_add(summary.num_shots as u64)
    );
    println!(
        "Detections:        {} / {} ({:.1}%)",
        summary.detections,
        summary.num_shots,
        summary.detection_rate() * 100.0
    );
    println!(
        "Statistic:         mean {:.4}, min {:.4}, max {:.4}",
        summary.mean_statistic, summary.min_statistic, summary.max_statistic
    );
}
