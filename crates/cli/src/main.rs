//! Trace-driven simulator of Intel cache replacement policies.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process;

use cache_core::config::{Config, CpuModel, Overrides};
use cache_core::hierarchy::Hierarchy;
use cache_core::trace::TraceReader;

mod output;

#[derive(Parser, Debug)]
#[command(
    name = "wayward",
    author,
    version,
    about = "Cycle-accurate simulator of reverse-engineered Intel cache replacement policies",
    long_about = None,
)]
struct Cli {
    /// Memory trace file; reads stdin when omitted or "-".
    trace: Option<String>,

    /// CPU model (nhm, snb, ivb, hsw, skl, cfl, or the full name).
    #[arg(short, long, default_value = "cfl")]
    cpu: String,

    /// TOML file overriding the selected model's cache parameters.
    #[arg(long)]
    config: Option<String>,

    /// Emit per-access rows as CSV instead of the aligned table.
    #[arg(long)]
    csv: bool,

    /// Suppress per-access rows; print only the banner and statistics.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let cpu = CpuModel::from_selector(&cli.cpu).unwrap_or_else(|| {
        let fallback = CpuModel::default();
        eprintln!(
            "[!] Unknown CPU selector '{}', using {}",
            cli.cpu,
            fallback.name()
        );
        fallback
    });
    let mut config = Config::for_cpu(cpu);

    if let Some(path) = &cli.config {
        let content = std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("[!] Failed to read config {}: {}", path, e);
            process::exit(1);
        });
        let overrides: Overrides = toml::from_str(&content).unwrap_or_else(|e| {
            eprintln!("[!] Failed to parse config {}: {}", path, e);
            process::exit(1);
        });
        config.apply(&overrides);
    }
    if let Err(e) = config.validate() {
        eprintln!("[!] Invalid configuration: {}", e);
        process::exit(1);
    }

    let input: Box<dyn BufRead> = match cli.trace.as_deref() {
        None | Some("-") => Box::new(BufReader::new(io::stdin())),
        Some(path) => Box::new(BufReader::new(File::open(path).unwrap_or_else(|e| {
            eprintln!("[!] Failed to open trace {}: {}", path, e);
            process::exit(1);
        }))),
    };

    let mut hierarchy = Hierarchy::new(&config);
    if let Err(e) = run(&cli, &config, &mut hierarchy, input) {
        eprintln!("[!] Output error: {}", e);
        process::exit(1);
    }

    hierarchy.stats.print();
}

fn run(
    cli: &Cli,
    config: &Config,
    hierarchy: &mut Hierarchy,
    input: Box<dyn BufRead>,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    output::banner(&mut out, config)?;
    if !cli.quiet {
        output::header(&mut out, cli.csv)?;
    }

    for access in TraceReader::new(input) {
        let result = hierarchy.access(access.write, access.address);
        if !cli.quiet {
            output::row(&mut out, cli.csv, &result)?;
        }
    }

    out.flush()
}
