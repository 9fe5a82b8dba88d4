// genome_list.rs - Write the assembly list consumed by the external ANI tool

use argh::FromArgs;
use pairlink::data::alleles::list_assemblies;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

const OUTPUT_NAME: &str = "genome_list.txt";

#[derive(FromArgs)]
/// List all .fasta assemblies of a directory as absolute paths
struct GenomeListArgs {
    /// directory containing the assemblies
    #[argh(option)]
    assemblies: String,

    /// output directory for the genome list
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
    let args: GenomeListArgs = argh::from_env();

    let assemblies = list_assemblies(Path::new(&args.assemblies)).map_err(|e| e.to_string())?;
    if assemblies.is_empty() {
        println!("⚠️  No .fasta files found in {}", args.assemblies);
    }

    create_dir_all(&args.output)
        .map_err(|e| format!("Failed to create output directory '{}': {}", args.output, e))?;
    let out_path = Path::new(&args.output).join(OUTPUT_NAME);
    let file = File::create(&out_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", out_path.display(), e))?;

    let mut writer = BufWriter::new(file);
    for path in &assemblies {
        writeln!(writer, "{}", path.display()).map_err(|e| format!("Write error: {}", e))?;
    }
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;

    println!("✅ {} assemblies listed in: {}", assemblies.len(), out_path.display());
    Ok(())
}
