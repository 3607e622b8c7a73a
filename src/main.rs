mod logging;

use clap::{Parser, Subcommand};
use iban_parse::batch::{check_csv, write_report, BatchSummary};
use iban_parse::generator::random_iban;
use iban_parse::registry::{countries, iban_length, structure_for};
use iban_parse::{CountryCode, Iban};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "iban-parse")]
#[command(about = "IBAN validation and formatting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Parse(ParseArgs),
    Structure(StructureArgs),
    Generate(GenerateArgs),
    Check(CheckArgs),
}

#[derive(Parser)]
struct ParseArgs {
    #[arg(required = true)]
    ibans: Vec<String>,
}

#[derive(Parser)]
struct StructureArgs {
    #[arg(long)]
    country: Option<String>,
}

#[derive(Parser)]
struct GenerateArgs {
    #[arg(long)]
    country: String,
    #[arg(long, default_value_t = 1)]
    count: usize,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser)]
struct CheckArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value = "iban")]
    column: String,
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    logging::init_logging("iban-parse")?;
    let cli = Cli::parse();
    match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Structure(args) => run_structure(args),
        Command::Generate(args) => run_generate(args),
        Command::Check(args) => run_check(args),
    }
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let mut failures = 0usize;
    for input in &args.ibans {
        match Iban::parse(input) {
            Ok(iban) => {
                let country = iban.country();
                println!(
                    "{} | {} | {} ({})",
                    iban.as_str(),
                    iban.pretty(),
                    country.as_str(),
                    country.name()
                );
            }
            Err(err) => {
                failures += 1;
                println!("{input} | invalid: {err}");
            }
        }
    }
    if failures > 0 {
        return Err(format!("{failures} of {} input(s) invalid", args.ibans.len()));
    }
    Ok(())
}

fn run_structure(args: StructureArgs) -> Result<(), String> {
    let selected = match args.country {
        Some(code) => vec![lookup_country(&code)?],
        None => countries(),
    };
    for country in selected {
        let structure = structure_for(country).map_err(|err| err.to_string())?;
        println!(
            "{} | {} | length {} | {}{}",
            country.as_str(),
            country.name(),
            iban_length(country).unwrap_or(structure.len() + 4),
            country.as_str(),
            structure.to_grammar()
        );
    }
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let country = lookup_country(&args.country)?;
    let seed = args.seed.unwrap_or_else(random_seed);
    log::info!(
        "Generating {} IBAN(s) for {} (seed {})",
        args.count,
        country.as_str(),
        seed
    );

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..args.count {
        let iban = random_iban(&mut rng, country).map_err(|err| err.to_string())?;
        println!("{}", iban.pretty());
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let start = Instant::now();
    let report = check_csv(&args.input, &args.column)?;
    let elapsed = start.elapsed();

    match args.output {
        Some(output) => {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent).map_err(|err| err.to_string())?;
            }
            write_report(&output, &report.rows)?;
            log::info!("Report written to {}", output.display());
        }
        None => {
            for row in report.rows.iter().filter(|row| !row.valid) {
                println!(
                    "line {}: {} | {}",
                    row.line,
                    row.input,
                    row.error.as_deref().unwrap_or("invalid")
                );
            }
        }
    }

    print_summary(&report.summary);
    log::info!("Check time: {} ms", elapsed.as_millis());
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    println!(
        "Checked {} IBAN(s): valid={} invalid_characters={} wrong_checksum={} invalid_country={} invalid_structure={}",
        summary.total,
        summary.valid,
        summary.invalid_characters,
        summary.wrong_checksum,
        summary.invalid_country,
        summary.invalid_structure
    );
}

fn lookup_country(code: &str) -> Result<CountryCode, String> {
    let code = code.trim().to_uppercase();
    CountryCode::lookup(&code).ok_or_else(|| format!("unknown IBAN country: {code}"))
}

fn random_seed() -> u64 {
    let mut rng = rand::rngs::OsRng;
    rng.gen()
}
