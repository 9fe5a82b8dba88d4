// alleles_reformat.rs - Strip gaps and normalize ids of an allele FASTA database

use argh::FromArgs;
use pairlink::data::alleles::reformat_alleles;
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

const OUTPUT_NAME: &str = "alleles_reformat.fasta";

#[derive(FromArgs)]
/// Reformat an allele database: remove '-' gaps and rewrite record ids
struct ReformatArgs {
    /// allele database FASTA file
    #[argh(option)]
    bn: String,

    /// output directory for the reformatted database
    #[argh(option)]
    output: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let args: ReformatArgs = argh::from_env();

    let input = File::open(&args.bn).map_err(|e| format!("Failed to open allele database '{}': {}", args.bn, e))?;
    create_dir_all(&args.output)
        .map_err(|e| format!("Failed to create output directory '{}': {}", args.output, e))?;

    let out_path = Path::new(&args.output).join(OUTPUT_NAME);
    let output = File::create(&out_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", out_path.display(), e))?;

    let written = reformat_alleles(BufReader::new(input), BufWriter::new(output)).map_err(|e| e.to_string())?;
    println!("✅ {} alleles written to: {}", written, out_path.display());
    Ok(())
}
