// locus_jaccard.rs - Gene-content and allele-content Jaccard between allele FASTA files

use argh::FromArgs;
use indicatif::{ProgressBar, ProgressStyle};
use pairlink::core::compare_all;
use pairlink::data::loaders::{genome_name, load_path_list};
use pairlink::prelude::*;
use rayon::prelude::*;
use regex::Regex;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(FromArgs)]
/// Compute union, intersection and Jaccard index of locus headers from allele FASTA files
struct JaccardArgs {
    /// first input FASTA file
    #[argh(option, short = 'f')]
    fasta1: Option<String>,

    /// second input FASTA file
    #[argh(option, short = 'g')]
    fasta2: Option<String>,

    /// report Jaccard distance instead of similarity
    #[argh(switch, short = 'd')]
    distance: bool,

    /// file listing FASTA paths (one per line) to compare all-vs-all
    #[argh(option)]
    list: Option<String>,

    /// output file for batch mode (default: stdout)
    #[argh(option, short = 'o')]
    output: Option<String>,

    /// include only genomes whose file name matches this regex (batch mode)
    #[argh(option)]
    include_samples: Option<String>,

    /// exclude genomes whose file name matches this regex (batch mode)
    #[argh(option)]
    exclude_samples: Option<String>,

    /// skip headers with a single token instead of failing
    #[argh(switch)]
    lenient: bool,

    /// compute MD5 digests for records without a value_md5 annotation
    #[argh(switch)]
    hash_unannotated: bool,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    threads: Option<usize>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn build_extractor(args: &JaccardArgs) -> HeaderExtractor {
    let mut extractor = HeaderExtractor::new();
    if args.lenient {
        extractor = extractor.lenient();
    }
    if args.hash_unannotated {
        extractor = extractor.with_fallback_hasher(Box::new(Md5Hasher));
    }
    extractor
}

fn compile(pattern: Option<&String>, flag: &str) -> Result<Option<Regex>, String> {
    pattern
        .map(|p| Regex::new(p).map_err(|e| format!("Invalid {} regex: {}", flag, e)))
        .transpose()
}

fn run_main() -> Result<(), String> {
    let args: JaccardArgs = argh::from_env();
    let mode = JaccardMode::from_distance_flag(args.distance);
    let extractor = build_extractor(&args);

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
    }

    match (&args.list, &args.fasta1, &args.fasta2) {
        (None, Some(fasta1), Some(fasta2)) => {
            let genome1 = load_locus_map(Path::new(fasta1), &extractor).map_err(|e| e.to_string())?;
            let genome2 = load_locus_map(Path::new(fasta2), &extractor).map_err(|e| e.to_string())?;
            println!("{}", compare_loci(&genome1, &genome2, mode));
            Ok(())
        }
        (Some(list), None, None) => run_batch(&args, list, &extractor, mode),
        _ => Err("use either --fasta1 with --fasta2, or --list".to_string()),
    }
}

fn run_batch(args: &JaccardArgs, list: &str, extractor: &HeaderExtractor, mode: JaccardMode) -> Result<(), String> {
    let include = compile(args.include_samples.as_ref(), "include_samples")?;
    let exclude = compile(args.exclude_samples.as_ref(), "exclude_samples")?;

    let mut paths = load_path_list(Path::new(list))
        .map_err(|e| format!("Failed to read list file '{}': {}", list, e))?;
    let listed = paths.len();
    paths.retain(|path| {
        let name = genome_name(path);
        include.as_ref().map_or(true, |re| re.is_match(&name))
            && !exclude.as_ref().map_or(false, |re| re.is_match(&name))
    });
    if paths.len() != listed {
        eprintln!("Sample filters: kept {} genomes (removed {})", paths.len(), listed - paths.len());
    }
    if paths.len() < 2 {
        return Err(format!("at least 2 genomes are required, found {}", paths.len()));
    }

    eprintln!("🧬 Loading {} locus maps ({})", paths.len(), mode.description());
    let maps = paths
        .par_iter()
        .map(|path| load_locus_map(path, extractor))
        .collect::<pairlink::Result<Vec<LocusMap>>>()
        .map_err(|e| e.to_string())?;

    let total = maps.len() * (maps.len() - 1) / 2;
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .map_err(|e| format!("Invalid progress template: {}", e))?,
    );

    let reports = compare_all(&maps, mode, Some(&pb));
    pb.finish_with_message(format!("✅ {} pairs compared", reports.len()));

    match &args.output {
        Some(output) => {
            let file = File::create(output).map_err(|e| format!("Failed to create output file '{}': {}", output, e))?;
            write_similarity_reports(BufWriter::new(file), &reports, true).map_err(|e| e.to_string())?;
            eprintln!("✅ Jaccard table written to: {}", output);
        }
        None => {
            let stdout = std::io::stdout();
            write_similarity_reports(stdout.lock(), &reports, true).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}
